//! HTML message formatting for Telegram notifications.
//!
//! Numbers keep the venue's text when they cannot be parsed, so a strange
//! value shows up verbatim instead of breaking the message.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::num::parse_decimal;
use crate::domain::{DomainEvent, Fill, PositionSnapshot, Side, WalletId};
use crate::port::EventFormatter;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
const EXPLORER_URL: &str = "https://www.coinglass.com/hyperliquid";

/// Renders domain events as Telegram HTML.
#[derive(Debug, Clone, Copy)]
pub struct HtmlFormatter {
    clock: fn() -> DateTime<Utc>,
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self { clock: Utc::now }
    }
}

impl HtmlFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed clock for position timestamps.
    #[must_use]
    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self { clock }
    }

    /// Message announcing that monitoring has begun.
    #[must_use]
    pub fn startup_notice(&self, wallets: &[WalletId]) -> String {
        let mut msg = format!(
            "🚀 <b>Monitoring Started</b>\n\n👛 <b>Wallets:</b> {}\n",
            wallets.len()
        );
        for wallet in wallets {
            msg.push_str(&format!("• <code>{}</code>\n", escape_html(wallet.as_str())));
        }
        msg.push_str(&format!(
            "\n🕐 <b>Time:</b> {}",
            (self.clock)().format(TIME_FORMAT)
        ));
        msg
    }

    fn position(&self, wallet: &WalletId, snapshot: &PositionSnapshot, opened: bool) -> String {
        let emoji = match (opened, snapshot.side) {
            (true, Side::Long) => "🟢",
            (true, Side::Short) => "🔴",
            (false, _) => "⚪",
        };
        let action = if opened { "Opened" } else { "Closed" };
        let side_text = match snapshot.side {
            Side::Long => "Buy (Long)",
            Side::Short => "Sell (Short)",
        };

        format!(
            "{emoji} <b>Position {action} {}x {}</b>\n\
             \n\
             💎 <b>Coin:</b> {}\n\
             📊 <b>Type:</b> {side_text}\n\
             📏 <b>Size:</b> {}\n\
             💵 <b>Entry:</b> ${}\n\
             {} <b>PnL:</b> ${}\n\
             \n\
             🕐 <b>Time:</b> {}\n\
             🔗 <b>Wallet:</b> <code>{}</code>",
            escape_html(&snapshot.leverage_value),
            escape_html(&snapshot.leverage_type),
            escape_html(&snapshot.coin),
            amount(&snapshot.size),
            amount(&snapshot.entry_price),
            pnl_emoji(&snapshot.unrealized_pnl),
            pnl(&snapshot.unrealized_pnl),
            (self.clock)().format(TIME_FORMAT),
            escape_html(wallet.as_str()),
        )
    }

    fn fill(wallet: &WalletId, fill: &Fill) -> String {
        let emoji = match (fill.is_opening(), fill.side.as_str()) {
            (true, "B") => "🔵",
            (true, "A") => "🔴",
            _ => "⚪",
        };
        let margin_mode = if fill.crossed { "Cross" } else { "Isolated" };
        let side_text = match fill.side.as_str() {
            "B" => "🟢 Buy (Long)".to_string(),
            "A" => "🔴 Sell (Short)".to_string(),
            other => escape_html(other),
        };
        let notional = match parse_decimal(&fill.start_position) {
            Some(start) => with_separators(start.abs(), 2, false),
            None => escape_html(&fill.start_position),
        };
        let time = Utc
            .timestamp_millis_opt(fill.timestamp)
            .single()
            .map_or_else(|| fill.timestamp.to_string(), |t| t.format(TIME_FORMAT).to_string());
        let wallet = escape_html(wallet.as_str());

        format!(
            "{emoji} <b>{} {margin_mode}</b>\n\
             \n\
             🆔 <b>Id:</b> <code>{}</code>\n\
             💎 <b>Coin:</b> {}\n\
             📊 <b>Type:</b> {side_text}\n\
             📏 <b>Size:</b> {} (${notional})\n\
             💵 <b>Price:</b> {}\n\
             {} <b>PnL:</b> ${}\n\
             \n\
             🕐 <b>Time:</b> {time}\n\
             🔗 <b>Wallet:</b> <a href=\"{EXPLORER_URL}/{wallet}\">{wallet}</a>",
            escape_html(&fill.direction),
            fill.trade_id,
            escape_html(&fill.coin),
            amount(&fill.size),
            amount(&fill.price),
            pnl_emoji(&fill.closed_pnl),
            pnl(&fill.closed_pnl),
        )
    }
}

impl EventFormatter for HtmlFormatter {
    fn render(&self, event: &DomainEvent) -> String {
        match event {
            DomainEvent::PositionOpened { wallet, snapshot } => {
                self.position(wallet, snapshot, true)
            }
            DomainEvent::PositionClosed { wallet, snapshot } => {
                self.position(wallet, snapshot, false)
            }
            DomainEvent::FillObserved { wallet, fill } => Self::fill(wallet, fill),
        }
    }
}

/// Up to four decimals, trailing zeros trimmed, thousands separated.
#[must_use]
pub fn amount(raw: &str) -> String {
    parse_decimal(raw).map_or_else(|| escape_html(raw), |v| with_separators(v, 4, true))
}

/// Exactly two decimals, thousands separated.
#[must_use]
pub fn pnl(raw: &str) -> String {
    parse_decimal(raw).map_or_else(|| escape_html(raw), |v| with_separators(v, 2, false))
}

fn pnl_emoji(raw: &str) -> &'static str {
    match parse_decimal(raw) {
        Some(v) if v > Decimal::ZERO => "💰",
        Some(v) if v < Decimal::ZERO => "💸",
        _ => "💱",
    }
}

fn with_separators(value: Decimal, decimals: u32, trim: bool) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    // Plain `Display` only; precision formatting overflows rust_decimal's
    // fixed buffer for values near `Decimal::MAX`.
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + decimals as usize + 2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if trim {
        let frac = frac_part.trim_end_matches('0');
        if !frac.is_empty() {
            out.push('.');
            out.push_str(frac);
        }
    } else if decimals > 0 {
        out.push('.');
        out.push_str(frac_part);
        for _ in frac_part.len()..decimals as usize {
            out.push('0');
        }
    }
    out
}

/// Escape text for Telegram's HTML parse mode.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{fill, snapshot};

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn amounts_trim_and_group() {
        assert_eq!(amount("1234.5000"), "1,234.5");
        assert_eq!(amount("0.123456"), "0.1235");
        assert_eq!(amount("1000000"), "1,000,000");
        assert_eq!(amount("-2500.25"), "-2,500.25");
        assert_eq!(amount("12"), "12");
    }

    #[test]
    fn pnl_has_two_decimals() {
        assert_eq!(pnl("1234.5"), "1,234.50");
        assert_eq!(pnl("-0.004"), "0.00");
        assert_eq!(pnl("-12.345"), "-12.35");
    }

    #[test]
    fn extreme_magnitudes_do_not_panic() {
        assert_eq!(amount("1e26"), "100,000,000,000,000,000,000,000,000");
        assert_eq!(
            pnl("79228162514264337593543950335"),
            "79,228,162,514,264,337,593,543,950,335.00"
        );
        assert_eq!(
            pnl("-79228162514264337593543950335"),
            "-79,228,162,514,264,337,593,543,950,335.00"
        );
        // Beyond the decimal range the venue text is shown as is.
        assert_eq!(amount("1e100"), "1e100");
    }

    #[test]
    fn pnl_pads_short_fractions() {
        assert_eq!(pnl("5"), "5.00");
        assert_eq!(pnl("0.1"), "0.10");
    }

    #[test]
    fn unparsable_numbers_fall_back_to_raw() {
        assert_eq!(amount("n/a"), "n/a");
        assert_eq!(pnl("<bad>"), "&lt;bad&gt;");
    }

    #[test]
    fn escapes_html() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn renders_opened_long_position() {
        let formatter = HtmlFormatter::with_clock(fixed_clock);
        let event = DomainEvent::PositionOpened {
            wallet: WalletId::new("0xABC"),
            snapshot: snapshot("BTC", Side::Long),
        };
        let text = formatter.render(&event);

        assert!(text.starts_with("🟢 <b>Position Opened 20x cross</b>"));
        assert!(text.contains("Buy (Long)"));
        assert!(text.contains("<b>Size:</b> 1,500.25"));
        assert!(text.contains("💰 <b>PnL:</b> $12.50"));
        assert!(text.contains("2024-03-01 12:00:00 UTC"));
        assert!(text.contains("<code>0xabc</code>"));
    }

    #[test]
    fn renders_closed_short_position() {
        let formatter = HtmlFormatter::with_clock(fixed_clock);
        let event = DomainEvent::PositionClosed {
            wallet: WalletId::new("0xabc"),
            snapshot: snapshot("ETH", Side::Short),
        };
        let text = formatter.render(&event);
        assert!(text.starts_with("⚪ <b>Position Closed"));
        assert!(text.contains("Sell (Short)"));
    }

    #[test]
    fn renders_fill() {
        let formatter = HtmlFormatter::new();
        let mut f = fill("ETH", 42, 1_700_000_000_000);
        f.direction = "Open Long".into();
        f.side = "B".into();
        f.start_position = "-1234.5".into();
        f.closed_pnl = "-3.1".into();
        f.crossed = true;
        let text = formatter.render(&DomainEvent::FillObserved {
            wallet: WalletId::new("0xabc"),
            fill: f,
        });

        assert!(text.starts_with("🔵 <b>Open Long Cross</b>"));
        assert!(text.contains("<code>42</code>"));
        assert!(text.contains("🟢 Buy (Long)"));
        assert!(text.contains("($1,234.50)"));
        assert!(text.contains("💸 <b>PnL:</b> $-3.10"));
        assert!(text.contains("2023-11-14 22:13:20 UTC"));
        assert!(text.contains(r#"<a href="https://www.coinglass.com/hyperliquid/0xabc">0xabc</a>"#));
    }

    #[test]
    fn closing_fill_uses_neutral_emoji_and_escapes_text() {
        let mut f = fill("<X>", 1, 0);
        f.direction = "Close Short".into();
        f.side = "A".into();
        let text = HtmlFormatter::new().render(&DomainEvent::FillObserved {
            wallet: WalletId::new("0xabc"),
            fill: f,
        });
        assert!(text.starts_with("⚪ <b>Close Short Isolated</b>"));
        assert!(text.contains("&lt;X&gt;"));
        assert!(text.contains("🔴 Sell (Short)"));
    }

    #[test]
    fn startup_notice_lists_wallets() {
        let text = HtmlFormatter::with_clock(fixed_clock)
            .startup_notice(&[WalletId::new("0xA"), WalletId::new("0xB")]);
        assert!(text.contains("Monitoring Started"));
        assert!(text.contains("<code>0xa</code>"));
        assert!(text.contains("<code>0xb</code>"));
    }
}
