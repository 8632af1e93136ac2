use crate::domain::model::{User, UserRole};
use crate::utils::error::{MarketError, Result};
use crate::utils::validation::{validate_email, validate_non_empty_string, Validate};
use std::time::Duration;
use url::Url;

pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1500);

const DEFAULT_FREELANCER_NAME: &str = "Sanjeev Sharma";
const DEFAULT_CLIENT_NAME: &str = "Arun Bhattarai";
const DEFAULT_PHONE: &str = "9800000000";
const AVATAR_ENDPOINT: &str = "https://ui-avatars.com/api/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub mode: AuthMode,
    pub role: UserRole,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

impl AuthRequest {
    pub fn login(email: impl Into<String>, role: UserRole) -> Self {
        Self {
            mode: AuthMode::Login,
            role,
            email: email.into(),
            full_name: None,
            phone: None,
        }
    }

    pub fn signup(
        email: impl Into<String>,
        role: UserRole,
        full_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            mode: AuthMode::Signup,
            role,
            email: email.into(),
            full_name: Some(full_name.into()),
            phone: Some(phone.into()),
        }
    }
}

impl Validate for AuthRequest {
    fn validate(&self) -> Result<()> {
        validate_email("email", &self.email)?;

        if self.mode == AuthMode::Signup {
            let name = self.full_name.as_deref().ok_or_else(|| MarketError::MissingConfigError {
                field: "full_name".to_string(),
            })?;
            validate_non_empty_string("full_name", name)?;

            let phone = self.phone.as_deref().ok_or_else(|| MarketError::MissingConfigError {
                field: "phone".to_string(),
            })?;
            validate_non_empty_string("phone", phone)?;
        }

        Ok(())
    }
}

/// 登入後覆蓋到預設使用者上的欄位
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePatch {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub avatar: String,
}

impl ProfilePatch {
    pub fn apply_to(self, template: &User) -> User {
        User {
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            avatar: self.avatar,
            ..template.clone()
        }
    }
}

/// 模擬的驗證流程：不連線，只等待一段時間後產生使用者資料
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    delay: Duration,
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_DELAY)
    }
}

impl MockAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn authenticate(&self, request: &AuthRequest) -> Result<ProfilePatch> {
        request.validate()?;

        tracing::debug!("⏳ Simulating auth round trip ({:?})", self.delay);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let signup_name = match request.mode {
            AuthMode::Signup => request.full_name.clone(),
            AuthMode::Login => None,
        };

        let name = signup_name.clone().unwrap_or_else(|| {
            if request.role == UserRole::Client {
                DEFAULT_CLIENT_NAME.to_string()
            } else {
                DEFAULT_FREELANCER_NAME.to_string()
            }
        });

        let phone = match request.mode {
            AuthMode::Signup => request.phone.clone().unwrap_or_default(),
            AuthMode::Login => DEFAULT_PHONE.to_string(),
        };

        let avatar = avatar_url(signup_name.as_deref().unwrap_or("User"))?;

        tracing::info!("🔐 Authenticated {} as {:?}", request.email, request.role);

        Ok(ProfilePatch {
            name,
            email: request.email.clone(),
            phone,
            role: request.role,
            avatar,
        })
    }
}

fn avatar_url(name: &str) -> Result<String> {
    let url = Url::parse_with_params(AVATAR_ENDPOINT, &[("name", name), ("background", "random")])
        .map_err(|e| MarketError::ConfigError {
            message: format!("invalid avatar url: {}", e),
        })?;
    Ok(url.to_string())
}
