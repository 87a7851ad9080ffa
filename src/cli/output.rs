//! Operator-facing text for the `check` commands.

use std::fmt::Display;
use std::future::Future;
use std::io::{self, Write};

use crate::domain::WalletId;
use crate::error::Result;

const RULE_WIDTH: usize = 56;
const LABEL_WIDTH: usize = 14;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("{label:<LABEL_WIDTH$} {value}");
}

/// Print the wallet count followed by one indented address per line.
pub fn wallets(wallets: &[WalletId]) {
    key_value("Wallets", wallets.len());
    for wallet in wallets {
        println!("{:<LABEL_WIDTH$} • {wallet}", "");
    }
}

/// Print a secret with only its edges visible.
#[cfg(feature = "telegram")]
pub fn secret(label: &str, value: &str) {
    key_value(label, mask(value));
}

/// Print a successful status line.
pub fn ok(message: &str) {
    println!("✓ {message}");
}

/// Print a warning status line.
pub fn warn(message: &str) {
    println!("⚠ {message}");
}

/// Run `action` behind a `Label... ok|failed` line.
pub async fn step<T>(label: &str, action: impl Future<Output = Result<T>>) -> Result<T> {
    print!("{label}... ");
    let _ = io::stdout().flush();
    let result = action.await;
    println!("{}", if result.is_ok() { "ok" } else { "failed" });
    result
}

#[cfg(feature = "telegram")]
fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() >= 15 {
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 5..].iter().collect();
        format!("{head}...{tail}")
    } else {
        let head: String = chars.iter().take(4).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[cfg(feature = "telegram")]
    #[test]
    fn mask_hides_middle_of_secret() {
        assert_eq!(mask("1234567890:ABCDEFGHIJ"), "1234567890...FGHIJ");
        assert_eq!(mask("short"), "shor...");
    }

    #[tokio::test]
    async fn step_passes_result_through() {
        assert_eq!(step("Adding", async { Ok(2) }).await.unwrap(), 2);
        let failed: Result<()> = step("Failing", async {
            Err(Error::Connection("refused".into()))
        })
        .await;
        assert!(matches!(failed, Err(Error::Connection(_))));
    }
}
