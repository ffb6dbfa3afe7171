//! User and role management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use tradepost_core::error::AppError;
use tradepost_database::repositories::{RoleRepository, UserRepository};
use tradepost_entity::user::{RoleSet, UserRole};
use tradepost_service::admin::{AdminUser, attach_roles};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users with their roles
    List,
    /// Grant a role (admin, backoffice, client, visitor)
    Grant {
        /// Account email
        email: String,
        /// Role to grant
        role: String,
    },
    /// Revoke a role
    Revoke {
        /// Account email
        email: String,
        /// Role to revoke
        role: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    company: String,
    verified: bool,
    roles: String,
    created_at: String,
}

fn roles_label(roles: &RoleSet) -> String {
    roles.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(", ")
}

impl From<AdminUser> for UserRow {
    fn from(u: AdminUser) -> Self {
        Self {
            id: u.user_id.to_string(),
            roles: roles_label(&u.roles),
            email: u.email,
            name: format!("{} {}", u.first_name, u.last_name),
            company: u.company_name.unwrap_or_default(),
            verified: u.is_verified,
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let user_repo = UserRepository::new(pool.clone());
    let role_repo = RoleRepository::new(pool);

    match &args.command {
        UserCommand::List => {
            let users = user_repo.list_with_profiles().await?;
            let assignments = role_repo.all_assignments().await?;
            let rows: Vec<UserRow> = attach_roles(users, assignments)
                .into_iter()
                .map(UserRow::from)
                .collect();

            output::print_list(&rows, format);
        }
        UserCommand::Grant { email, role } => {
            let role: UserRole = role.parse()?;
            let user = user_repo
                .find_by_email(email)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))?;

            if role_repo.grant(user.id, role).await? {
                output::print_success(&format!("Granted '{role}' to {email}"));
            } else {
                println!("{email} already has '{role}'.");
            }
        }
        UserCommand::Revoke { email, role, yes } => {
            let role: UserRole = role.parse()?;
            let user = user_repo
                .find_by_email(email)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{email}' not found")))?;

            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Revoke '{role}' from {email}?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            if role_repo.revoke(user.id, role).await? {
                output::print_success(&format!("Revoked '{role}' from {email}"));
            } else {
                println!("{email} does not have '{role}'.");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_user_row_lists_roles_and_name() {
        let row = UserRow::from(AdminUser {
            user_id: Uuid::nil(),
            email: "ops@example.com".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            company_name: None,
            is_verified: true,
            roles: [UserRole::Client, UserRole::Admin].into_iter().collect(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 4, 9, 30, 0).unwrap(),
        });

        assert_eq!(row.name, "Ana Silva");
        assert_eq!(row.company, "");
        assert_eq!(row.roles, "admin, client");
        assert_eq!(row.created_at, "2025-03-04 09:30");
    }
}
