use crate::core::auth::ProfilePatch;
use crate::domain::model::{Theme, User};
use crate::domain::ports::Storage;
use crate::utils::error::{MarketError, Result};

pub const USER_KEY: &str = "kaamkhoj_user";
pub const THEME_KEY: &str = "theme";

/// 目前登入的使用者與主題設定，生命週期：load → login/logout → drop
pub struct Session<S: Storage> {
    storage: S,
    user: Option<User>,
    theme: Theme,
}

impl<S: Storage> Session<S> {
    /// 從儲存讀回狀態；沒有紀錄時使用預設值
    pub async fn load(storage: S, prefers_dark: bool) -> Result<Self> {
        let user = match read_optional(&storage, USER_KEY).await? {
            Some(bytes) => match serde_json::from_slice::<User>(&bytes) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("⚠️ Ignoring unreadable saved user record: {}", e);
                    None
                }
            },
            None => None,
        };

        let system_theme = if prefers_dark { Theme::Dark } else { Theme::Light };
        // 有存值時只有 "dark" 代表深色，其餘一律視為淺色
        let saved = read_optional(&storage, THEME_KEY)
            .await?
            .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
            .filter(|value| !value.is_empty());
        let theme = match saved {
            Some(value) => value.parse::<Theme>().unwrap_or_else(|e| {
                tracing::warn!("⚠️ {}, treating it as light", e);
                Theme::Light
            }),
            None => system_theme,
        };

        tracing::debug!(
            "Session loaded (user: {}, theme: {})",
            user.as_ref().map(|u| u.email.as_str()).unwrap_or("-"),
            theme.as_str()
        );

        Ok(Self {
            storage,
            user,
            theme,
        })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(MarketError::NotLoggedIn)
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// 以預設使用者為底套用登入資料並保存
    pub async fn login(&mut self, template: &User, patch: ProfilePatch) -> Result<&User> {
        let user = patch.apply_to(template);
        let data = serde_json::to_vec(&user)?;
        self.storage.write_file(USER_KEY, &data).await?;

        tracing::info!("👋 Welcome back, {}!", user.name);
        Ok(self.user.insert(user))
    }

    pub async fn logout(&mut self) -> Result<()> {
        match self.storage.remove_file(USER_KEY).await {
            Ok(()) => {}
            Err(MarketError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }

        if let Some(user) = self.user.take() {
            tracing::info!("🚪 {} signed out", user.email);
        }
        Ok(())
    }

    pub async fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.storage
            .write_file(THEME_KEY, theme.as_str().as_bytes())
            .await?;
        self.theme = theme;
        Ok(())
    }

    pub async fn toggle_theme(&mut self) -> Result<Theme> {
        let next = self.theme.toggled();
        self.set_theme(next).await?;
        Ok(next)
    }
}

async fn read_optional<S: Storage>(storage: &S, key: &str) -> Result<Option<Vec<u8>>> {
    match storage.read_file(key).await {
        Ok(data) => Ok(Some(data)),
        Err(MarketError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
