use crate::core::assistant::{
    Assistant, Suggestion, SuggestionResultExt, GIG_DESCRIPTION_FALLBACK, PROFILE_TIP_FALLBACK,
    PROPOSAL_FALLBACK,
};
use crate::core::auth::{AuthRequest, MockAuthenticator};
use crate::core::catalog::Catalog;
use crate::core::dashboard::DashboardOverview;
use crate::core::session::Session;
use crate::domain::model::{Order, OrderStatus, User};
use crate::domain::ports::{Storage, TextGenerator};
use crate::utils::error::{MarketError, Result};

/// 把目錄、登入狀態與 AI 助手串在一起的應用程式上下文
pub struct Marketplace<S: Storage, G: TextGenerator> {
    catalog: Catalog,
    session: Session<S>,
    authenticator: MockAuthenticator,
    assistant: Assistant<G>,
    default_price_ceiling: u64,
}

impl<S: Storage, G: TextGenerator> Marketplace<S, G> {
    pub fn new(
        catalog: Catalog,
        session: Session<S>,
        authenticator: MockAuthenticator,
        generator: G,
        default_price_ceiling: u64,
    ) -> Self {
        Self {
            catalog,
            session,
            authenticator,
            assistant: Assistant::new(generator),
            default_price_ceiling,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<S> {
        &mut self.session
    }

    pub fn default_price_ceiling(&self) -> u64 {
        self.default_price_ceiling
    }

    pub async fn login(&mut self, request: AuthRequest) -> Result<&User> {
        let patch = self.authenticator.authenticate(&request).await?;
        let template = self
            .catalog
            .template_user()
            .ok_or_else(|| MarketError::NotFound {
                kind: "User".to_string(),
                id: "template".to_string(),
            })?;
        self.session.login(template, patch).await
    }

    pub async fn logout(&mut self) -> Result<()> {
        self.session.logout().await
    }

    pub fn dashboard(&self, status: Option<OrderStatus>) -> Result<(DashboardOverview, Vec<&Order>)> {
        let user = self.session.require_user()?;
        let overview = DashboardOverview::build(user, &self.catalog);
        Ok((overview, self.catalog.orders_with_status(status)))
    }

    pub async fn suggest_profile_tip(&self) -> Result<Suggestion> {
        let user = self.session.require_user()?;
        Ok(self
            .assistant
            .optimize_profile(&user.bio, &user.skills)
            .await
            .or_fallback(PROFILE_TIP_FALLBACK))
    }

    pub async fn suggest_gig_description(
        &self,
        title: &str,
        category: &str,
        skills: &[String],
    ) -> Suggestion {
        self.assistant
            .generate_gig_description(title, category, skills)
            .await
            .or_fallback(GIG_DESCRIPTION_FALLBACK)
    }

    pub async fn suggest_proposal(&self, job_id: &str) -> Result<Suggestion> {
        let user = self.session.require_user()?;
        let job = self
            .catalog
            .jobs()
            .iter()
            .find(|j| j.id == job_id)
            .ok_or_else(|| MarketError::NotFound {
                kind: "Job".to_string(),
                id: job_id.to_string(),
            })?;

        Ok(self
            .assistant
            .generate_proposal(&job.title, &job.description, &user.skills)
            .await
            .or_fallback(PROPOSAL_FALLBACK))
    }
}
