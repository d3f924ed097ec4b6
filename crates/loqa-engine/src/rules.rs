//! Forbidden-term rules.
//!
//! A [`TermRule`] rewrites a deprecated or mistranslated phrase in the target
//! text when a [`ContextKind`] predicate over the row's source text holds.
//! Rules run in declaration order over an accumulating string: a rule sees
//! the text as earlier rules left it.

use crate::text::{contains_ignore_case, find_ignore_case};

/// Predicate over a row's source text that gates a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    Always,
    SourceContainsAny(&'static [&'static str]),
    SourceContainsAnyExcept {
        any: &'static [&'static str],
        none: &'static [&'static str],
    },
}

impl ContextKind {
    #[must_use]
    pub fn holds(&self, source: &str) -> bool {
        let contains_any = |keywords: &[&str]| keywords.iter().any(|kw| source.contains(kw));
        match *self {
            Self::Always => true,
            Self::SourceContainsAny(any) => contains_any(any),
            Self::SourceContainsAnyExcept { any, none } => {
                contains_any(any) && !contains_any(none)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermRule {
    /// Phrase to find in the target, matched case-insensitively.
    pub pattern: &'static str,
    pub replacement: &'static str,
    pub context: ContextKind,
    /// The rule is skipped while the target contains any of these phrases
    /// (case-insensitive).
    pub unless_target_contains: &'static [&'static str],
}

impl TermRule {
    #[must_use]
    pub const fn always(pattern: &'static str, replacement: &'static str) -> Self {
        Self {
            pattern,
            replacement,
            context: ContextKind::Always,
            unless_target_contains: &[],
        }
    }

    #[must_use]
    pub const fn when_any(
        pattern: &'static str,
        replacement: &'static str,
        any: &'static [&'static str],
    ) -> Self {
        Self {
            pattern,
            replacement,
            context: ContextKind::SourceContainsAny(any),
            unless_target_contains: &[],
        }
    }

    #[must_use]
    pub const fn when_any_except(
        pattern: &'static str,
        replacement: &'static str,
        any: &'static [&'static str],
        none: &'static [&'static str],
    ) -> Self {
        Self {
            pattern,
            replacement,
            context: ContextKind::SourceContainsAnyExcept { any, none },
            unless_target_contains: &[],
        }
    }

    #[must_use]
    pub const fn unless_target_contains(mut self, phrases: &'static [&'static str]) -> Self {
        self.unless_target_contains = phrases;
        self
    }

    /// Whether the pattern is a real rewrite rather than a case change.
    fn is_rewrite(&self) -> bool {
        self.pattern.to_lowercase() != self.replacement.to_lowercase()
    }
}

/// Outcome of running a rule set over one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRewrite {
    pub text: String,
    /// `matched→replacement` for every rule that fired, in order.
    pub hits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<TermRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec())
    }
}

impl RuleSet {
    #[must_use]
    pub const fn new(rules: Vec<TermRule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[TermRule] {
        &self.rules
    }

    /// Apply every qualifying rule in order, each replacing the leftmost
    /// occurrence of its pattern in the accumulated text.
    ///
    /// Returns `None` when no rule fired.
    #[must_use]
    pub fn apply(&self, target: &str, source: &str) -> Option<RuleRewrite> {
        let mut text = target.to_string();
        let mut hits = Vec::new();

        for rule in &self.rules {
            let Some(range) = find_ignore_case(&text, rule.pattern) else {
                continue;
            };
            if !rule.context.holds(source) {
                continue;
            }
            if rule
                .unless_target_contains
                .iter()
                .any(|phrase| contains_ignore_case(&text, phrase))
            {
                continue;
            }

            hits.push(format!("{}→{}", &text[range.clone()], rule.replacement));
            text.replace_range(range, rule.replacement);
        }

        (!hits.is_empty()).then_some(RuleRewrite { text, hits })
    }

    /// Whether `text` still contains a forbidden pattern, regardless of
    /// context. Standard translations that do are not trusted.
    #[must_use]
    pub fn mentions_forbidden(&self, text: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.is_rewrite() && contains_ignore_case(text, rule.pattern))
    }
}

const USDT_DISCOUNT: &[&str] = &["折U", "折合U", "USDT"];
const REBATE: &[&str] = &["返佣", "佣金"];
const REBATE_OR_SPOT: &[&str] = &["返佣", "佣金", "现货"];
const REBATE_OR_FUTURES: &[&str] = &["返佣", "佣金", "合约"];
const REBATE_OR_USDT: &[&str] = &["返佣", "折U"];
const FUTURES_ACCOUNT: &[&str] = &["合约账户", "合约"];
const FUTURES: &[&str] = &["合约", "期货"];
const COPY_TRADE: &[&str] = &["跟单", "带单", "复制交易", "Copy Trade"];
const SPOT: &[&str] = &["现货"];
const TRADER: &[&str] = &["交易员", "交易达人", "带单"];
const OTC_MERCHANT: &[&str] = &["OTC", "商家"];
const REBATE_ANY: &[&str] = &["返佣", "反佣", "佣金"];
const ORDER: &[&str] = &["委托", "下单", "挂单", "订单", "撤单", "限价", "市价"];
const PAYMENT: &[&str] = &["购买", "付款", "OTC", "法币", "商家", "买币", "卖币", "充值", "提现"];
const MARKET: &[&str] = &["市价"];
const LIMIT: &[&str] = &["限价"];
const OPEN_POSITION: &[&str] = &["开仓", "仓位", "持仓"];
const CLOSE_POSITION: &[&str] = &["平仓", "仓位", "持仓"];
const INVOICE: &[&str] = &["hóa đơn"];

/// Built-in rule table, in evaluation order.
///
/// Case variants of one phrase are listed separately so that repeated
/// occurrences in a single string are each rewritten.
pub const DEFAULT_RULES: &[TermRule] = &[
    TermRule::always("Hợp đồng tương lai", "Futures"),
    TermRule::always("hợp đồng tương lai", "Futures"),
    TermRule::always("Hợp đồng Tương lai", "Futures"),
    TermRule::always("sức mạnh băm", "Hashrate"),
    TermRule::always("Sức mạnh băm", "Hashrate"),
    TermRule::always("Quyền lực tính toán", "Hashrate"),
    TermRule::always("Sức mạnh tính toán", "Hashrate"),
    TermRule::always("sức mạnh tính toán", "Hashrate"),
    TermRule::always("Kết Thúc Sớm?", "Có kết thúc trước thời hạn không?"),
    TermRule::always("Chấm dứt cai nghiện", "Rút tiền đã đóng"),
    TermRule::always("Xác nhận rút quân", "Xác nhận rút tiền"),
    TermRule::always("dakika", "phút"),
    TermRule::always("Giao dịch bằng đồng xu", "Giao dịch đồng coin"),
    TermRule::always("Liên đoàn", "Liên minh"),
    TermRule::always("Trí tuệ nhân tạo", "AI"),
    TermRule::always("trí tuệ nhân tạo", "AI"),
    TermRule::always("Đại chỉ", "Địa chỉ"),
    TermRule::always("Marj gin", "Margin"),
    TermRule::always("gấp U", "USDT"),
    TermRule::when_any("chiết khấu theo USDT", "USDT", USDT_DISCOUNT),
    TermRule::when_any("chiết khấu U", "USDT", USDT_DISCOUNT),
    TermRule::when_any("giảm giá ở USDT", "USDT", USDT_DISCOUNT),
    TermRule::when_any("Giảm giá tích lũy tại chỗ", "Hoàn phí Spot tích lũy", REBATE),
    TermRule::when_any("Chấm giảm giá", "Hoàn phí Spot", REBATE_OR_SPOT),
    TermRule::when_any("Giảm giá tích lũy", "Hoàn phí tích lũy", REBATE),
    TermRule::when_any("Giảm giá Futures", "Hoàn phí Futures", REBATE_OR_FUTURES),
    TermRule::when_any("Giảm giá (giảm giá ở USDT)", "Hoàn phí (USDT)", REBATE_OR_USDT),
    TermRule::when_any_except("Giảm giá", "Hoàn phí", REBATE, &["折"]),
    TermRule::always("Tài khoản Hợp đồng Tương lai", "Tài khoản Futures"),
    TermRule::when_any("Tài khoản Hợp đồng", "Tài khoản Futures", FUTURES_ACCOUNT),
    TermRule::always("Ủy ban tương lai", "Hoa hồng Futures"),
    TermRule::always("Tên tương lai", "Tên Futures"),
    TermRule::when_any("tương lai", "Futures", FUTURES),
    TermRule::always("Lợi nhuận và lỗ của doanh nghiệp", "Lãi lỗ kinh doanh"),
    TermRule::always("Dữ liệu gửi và rút tiền", "Dữ liệu nạp và rút tiền"),
    TermRule::always("Chiến lược Al", "Chiến lược AI"),
    TermRule::always(" Al ", " AI "),
    TermRule::when_any("Sao chép giao dịch", "Copy Trade", COPY_TRADE),
    TermRule::when_any("sao chép giao dịch", "Copy Trade", COPY_TRADE),
    TermRule::when_any("Giao dịch sao chép", "Copy Trade", COPY_TRADE),
    TermRule::when_any("giao dịch sao chép", "Copy Trade", COPY_TRADE),
    TermRule::when_any("Giao ngay", "Spot", SPOT),
    TermRule::when_any("giao ngay", "Spot", SPOT),
    TermRule::when_any_except("Nhà giao dịch", "Trader", TRADER, OTC_MERCHANT),
    TermRule::when_any("rebate", "Hoàn phí", REBATE_ANY),
    TermRule::always("hoa hồng ngược", "Hoàn phí"),
    TermRule::when_any_except("Đơn hàng", "Lệnh", ORDER, PAYMENT)
        .unless_target_contains(INVOICE),
    TermRule::when_any_except("đơn hàng", "lệnh", ORDER, PAYMENT)
        .unless_target_contains(INVOICE),
    TermRule::when_any("Giá thị trường", "Giá Market", MARKET),
    TermRule::when_any("giá thị trường", "Giá Market", MARKET),
    TermRule::when_any("Giá giới hạn", "Giá Limit", LIMIT),
    TermRule::when_any("giá giới hạn", "Giá Limit", LIMIT),
    TermRule::when_any("Mở cửa", "Mở vị thế", OPEN_POSITION),
    TermRule::when_any("Đóng cửa", "Đóng vị thế", CLOSE_POSITION),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn apply(target: &str, source: &str) -> Option<String> {
        RuleSet::default().apply(target, source).map(|rewrite| rewrite.text)
    }

    #[test]
    fn futures_account_needs_contract_context() {
        assert_eq!(
            apply("Tài khoản Hợp đồng", "合约账户").as_deref(),
            Some("Tài khoản Futures")
        );
        assert_eq!(apply("Tài khoản Hợp đồng", "账户"), None);
    }

    #[test]
    fn unconditional_rules_ignore_source() {
        assert_eq!(apply("Sức mạnh băm", "").as_deref(), Some("Hashrate"));
    }

    #[test]
    fn rules_chain_over_accumulated_text() {
        let rewrite = RuleSet::default()
            .apply("Giảm giá Futures và Giảm giá", "返佣")
            .unwrap();
        assert_eq!(rewrite.text, "Hoàn phí Futures và Hoàn phí");
        assert_eq!(rewrite.hits.len(), 2);
    }

    #[rstest]
    #[case("Giảm giá", "返佣", Some("Hoàn phí"))]
    #[case("Giảm giá", "返佣折扣", None)]
    #[case("Nhà giao dịch", "交易员", Some("Trader"))]
    #[case("Nhà giao dịch", "OTC交易员", None)]
    fn exclusion_keywords_veto_rules(
        #[case] target: &str,
        #[case] source: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(apply(target, source).as_deref(), expected);
    }

    #[test]
    fn order_rule_spares_invoices() {
        assert_eq!(apply("Đơn hàng", "订单").as_deref(), Some("Lệnh"));
        assert_eq!(apply("Đơn hàng và hóa đơn", "订单"), None);
    }

    #[test]
    fn replacement_keeps_surrounding_text_and_reports_match() {
        let rewrite = RuleSet::default()
            .apply("Xem sức mạnh BĂM hôm nay", "算力")
            .unwrap();
        assert_eq!(rewrite.text, "Xem Hashrate hôm nay");
        assert_eq!(rewrite.hits, vec!["sức mạnh BĂM→Hashrate".to_string()]);
    }

    #[test]
    fn forbidden_mentions_ignore_context() {
        let rules = RuleSet::default();
        assert!(rules.mentions_forbidden("Giảm giá"));
        assert!(!rules.mentions_forbidden("Hoàn phí"));
    }

    #[test]
    fn custom_rule_sets_are_supported() {
        let rules = RuleSet::new(vec![TermRule::when_any("colour", "color", &["US"])]);
        assert_eq!(
            rules.apply("Colour", "US").map(|rewrite| rewrite.text).as_deref(),
            Some("color")
        );
        assert!(rules.apply("Colour", "UK").is_none());
    }
}
