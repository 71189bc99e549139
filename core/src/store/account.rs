use super::DashStore;
use crate::{error::DashResult, reports::Account, types::AccountId};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

impl DashStore {
    // ── Account ────────────────────────────────────────────────────────

    pub fn insert_account(
        &self,
        id: AccountId,
        username: &str,
        display_name: &str,
        created_on: NaiveDate,
    ) -> DashResult<()> {
        self.conn.execute(
            "INSERT INTO account (id, username, display_name, created_on)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                id,
                username,
                display_name,
                created_on.format("%Y-%m-%d").to_string()
            ],
        )?;
        Ok(())
    }

    /// Exact, case-sensitive username match. The only check the login gate makes.
    pub fn find_account_by_username(&self, username: &str) -> DashResult<Option<Account>> {
        self.conn
            .query_row(
                "SELECT id, username, display_name FROM account WHERE username = ?1",
                params![username],
                |row| {
                    Ok(Account {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        display_name: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn account_count(&self) -> DashResult<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM account", [], |row| row.get(0))?;
        Ok(n)
    }
}
