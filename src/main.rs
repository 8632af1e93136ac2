use anyhow::Context;
use clap::Parser;
use kaamkhoj::adapters::GeminiClient;
use kaamkhoj::app::render;
use kaamkhoj::config::cli::{parse_order_status, Command, DetailKind, SuggestTarget};
use kaamkhoj::core::assistant::OfflineGenerator;
use kaamkhoj::core::auth::{AuthRequest, MockAuthenticator};
use kaamkhoj::core::session::Session;
use kaamkhoj::domain::ports::{Storage, TextGenerator};
use kaamkhoj::utils::error::ErrorSeverity;
use kaamkhoj::utils::{logger, validation::Validate};
use kaamkhoj::{AppConfig, Catalog, CliConfig, LocalStorage, Marketplace};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting kaamkhoj CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut config = match AppConfig::from_file_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(storage) = &cli.storage {
        config.storage.path = storage.clone();
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let catalog = Catalog::builtin().context("embedded catalog data is invalid")?;
    let storage = LocalStorage::new(config.storage.path.clone());
    let session = Session::load(storage, config.marketplace.prefers_dark)
        .await
        .with_context(|| format!("failed to load session from {}", config.storage.path))?;
    let authenticator =
        MockAuthenticator::new(Duration::from_millis(config.auth.simulated_delay_ms));

    let generator: Box<dyn TextGenerator> = match config.api_key() {
        Some(key) => Box::new(
            GeminiClient::new(&config.assistant, key).context("failed to build HTTP client")?,
        ),
        None => {
            tracing::debug!("No API key configured, AI suggestions will use fallbacks");
            Box::new(OfflineGenerator)
        }
    };

    let mut market = Marketplace::new(
        catalog,
        session,
        authenticator,
        generator,
        config.marketplace.default_price_ceiling,
    );

    match run(cli.command, &mut market).await {
        Ok(output) => print!("{}", output),
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run<S: Storage, G: TextGenerator>(
    command: Command,
    market: &mut Marketplace<S, G>,
) -> kaamkhoj::Result<String> {
    let ceiling = market.default_price_ceiling();

    match command {
        Command::Gigs(filters) => {
            let params = filters.to_params(ceiling)?;
            render::render_listings(&market.catalog().search_gigs(&params), filters.format)
        }
        Command::Jobs(filters) => {
            let params = filters.to_params(ceiling)?;
            render::render_listings(&market.catalog().search_jobs(&params), filters.format)
        }
        Command::Courses(filters) => {
            let params = filters.to_params(ceiling)?;
            render::render_listings(&market.catalog().search_courses(&params), filters.format)
        }
        Command::Show { kind, id } => {
            let catalog = market.catalog();
            Ok(match kind {
                DetailKind::Gig => render::render_gig(catalog.gig_or_first(&id)?),
                DetailKind::Course => render::render_course(catalog.course_or_first(&id)?),
                DetailKind::Forum => render::render_forum_post(catalog.forum_post_or_first(&id)?),
            })
        }
        Command::Categories => Ok(render::render_categories()),
        Command::Login(args) => {
            let role = args.role()?;
            let request = if args.signup {
                AuthRequest::signup(
                    args.email.clone(),
                    role,
                    args.name.clone().unwrap_or_default(),
                    args.phone.clone().unwrap_or_default(),
                )
            } else {
                AuthRequest::login(args.email.clone(), role)
            };
            let user = market.login(request).await?;
            Ok(format!("✅ Welcome back, {}!\n", user.name))
        }
        Command::Logout => {
            market.logout().await?;
            Ok("Signed out.\n".to_string())
        }
        Command::Whoami => Ok(match market.session().user() {
            Some(user) => format!(
                "{} <{}> ({:?}, {})\n",
                user.name, user.email, user.role, user.location
            ),
            None => "Not logged in.\n".to_string(),
        }),
        Command::Notifications => Ok(render::render_notifications(
            market.catalog().notifications(),
        )),
        Command::Theme { choice } => {
            let session = market.session_mut();
            let theme = match choice {
                None => session.theme(),
                Some(choice) => match choice.as_theme() {
                    Some(theme) => {
                        session.set_theme(theme).await?;
                        theme
                    }
                    None => session.toggle_theme().await?,
                },
            };
            Ok(format!("Theme: {}\n", theme.as_str()))
        }
        Command::Dashboard { orders } => {
            let status = orders.as_deref().map(parse_order_status).transpose()?;
            let (overview, orders) = market.dashboard(status)?;
            Ok(render::render_overview(&overview, &orders))
        }
        Command::Suggest { target } => {
            let suggestion = match target {
                SuggestTarget::Profile => market.suggest_profile_tip().await?,
                SuggestTarget::Gig {
                    title,
                    category,
                    skills,
                } => market.suggest_gig_description(&title, &category, &skills).await,
                SuggestTarget::Proposal { job_id } => market.suggest_proposal(&job_id).await?,
            };
            if suggestion.fallback {
                tracing::warn!("⚠️ Showing fallback suggestion");
            }
            Ok(format!("{}\n", suggestion))
        }
    }
}
