//! Token command - mints a signed JWT for local development

use clap::Args;

use crate::config::AppConfig;
use crate::domain::user::{AuthenticatedUser, UserId};
use crate::infrastructure::auth::{JwtConfig, JwtGenerator, JwtService};

#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Subject of the token
    #[arg(long)]
    pub user_id: String,

    #[arg(long)]
    pub email: Option<String>,
}

/// Print a bearer token signed with the configured secret
pub fn run(args: TokenArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let token = mint(&config, args)?;

    println!("{}", token);
    Ok(())
}

fn mint(config: &AppConfig, args: TokenArgs) -> anyhow::Result<String> {
    let user_id = UserId::new(args.user_id)?;
    let user = AuthenticatedUser::new(user_id, args.email);

    let service = JwtService::new(JwtConfig::new(
        config.auth.jwt_secret.clone(),
        config.auth.expiration_hours,
    ));

    Ok(service.generate(&user)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minted_token_validates() {
        let config = AppConfig::default();
        let token = mint(
            &config,
            TokenArgs {
                user_id: "user-42".to_string(),
                email: Some("dev@example.com".to_string()),
            },
        )
        .unwrap();

        let service = JwtService::new(JwtConfig::new(config.auth.jwt_secret.clone(), 1));
        let user = service.validate(&token).unwrap().into_user().unwrap();
        assert_eq!(user.id().as_str(), "user-42");
        assert_eq!(user.email(), Some("dev@example.com"));
    }

    #[test]
    fn test_rejects_invalid_user_id() {
        let result = mint(
            &AppConfig::default(),
            TokenArgs {
                user_id: String::new(),
                email: None,
            },
        );
        assert!(result.is_err());
    }
}
