//! Content validation
//!
//! Provides [`RuleRegistry`], a list of independent [`LintRule`]s. Each rule
//! looks at one [`LintTarget`] and yields at most one [`LintWarning`].
//! Rules have no side effects and never see each other's results.
//!
//! # Built-in rules
//!
//! | Rule | Target | Fires when |
//! | --- | --- | --- |
//! | [`WhitespaceRule`] | names, attribute values | leading or trailing whitespace |
//! | [`ForbiddenDomainRule`] | datasheet | URL on a distributor domain |
//! | [`RedundantValueRule`] | value | value repeats the MPN |
//! | [`NoGatesRule`] | entity | no gates |
//! | [`NoPinsRule`] | unit | no pins |

use pool_item::{AttributeKey, Entity, Unit};
use serde::Serialize;

/// Something a rule can look at
#[derive(Debug, Clone, Copy)]
pub enum LintTarget<'a> {
    /// Display name of an item
    Name(&'a str),
    /// Resolved part attribute
    Attribute {
        /// Attribute
        key: AttributeKey,
        /// Resolved value
        value: &'a str,
        /// Resolved MPN of the same part
        mpn: &'a str,
    },
    /// Entity payload
    Entity(&'a Entity),
    /// Unit payload
    Unit(&'a Unit),
}

/// Finding of one rule
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LintWarning {
    /// Rule that produced it
    pub rule: &'static str,
    /// Reviewer-facing message
    pub message: String,
}

impl LintWarning {
    /// Create warning
    #[inline]
    #[must_use]
    pub fn new(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

/// One content rule
pub trait LintRule: Send + Sync {
    /// Stable rule name
    fn name(&self) -> &'static str;

    /// Check a target, ignoring targets the rule does not apply to
    fn check(&self, target: &LintTarget<'_>) -> Option<LintWarning>;
}

/// Leading or trailing whitespace in a name or value
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceRule;

impl WhitespaceRule {
    /// Check if a string has leading or trailing whitespace
    #[inline]
    #[must_use]
    pub fn needs_trim(s: &str) -> bool {
        s.starts_with(|c: char| c.is_ascii_whitespace())
            || s.ends_with(|c: char| c.is_ascii_whitespace())
    }
}

impl LintRule for WhitespaceRule {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn check(&self, target: &LintTarget<'_>) -> Option<LintWarning> {
        let text = match target {
            LintTarget::Name(name) => name,
            LintTarget::Attribute { value, .. } => value,
            LintTarget::Entity(_) | LintTarget::Unit(_) => return None,
        };
        Self::needs_trim(text)
            .then(|| LintWarning::new(self.name(), "has trailing/leading whitespace"))
    }
}

/// Datasheet hosted by a distributor instead of the manufacturer
#[derive(Debug, Clone, Default)]
pub struct ForbiddenDomainRule {
    domains: Vec<String>,
}

impl ForbiddenDomainRule {
    /// Create rule for a domain denylist
    #[must_use]
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }

    /// First denied domain the URL contains
    #[must_use]
    pub fn find_domain(&self, url: &str) -> Option<&str> {
        self.domains
            .iter()
            .map(String::as_str)
            .find(|domain| url.contains(domain))
    }
}

impl LintRule for ForbiddenDomainRule {
    fn name(&self) -> &'static str {
        "forbidden-domain"
    }

    fn check(&self, target: &LintTarget<'_>) -> Option<LintWarning> {
        let LintTarget::Attribute {
            key: AttributeKey::Datasheet,
            value,
            ..
        } = target
        else {
            return None;
        };
        let domain = self.find_domain(value)?;
        Some(LintWarning::new(
            self.name(),
            format!("forbidden domain {domain}, use primary source"),
        ))
    }
}

/// Value that only repeats the MPN
#[derive(Debug, Clone, Copy, Default)]
pub struct RedundantValueRule;

impl LintRule for RedundantValueRule {
    fn name(&self) -> &'static str {
        "redundant-value"
    }

    fn check(&self, target: &LintTarget<'_>) -> Option<LintWarning> {
        match target {
            LintTarget::Attribute {
                key: AttributeKey::Value,
                value,
                mpn,
            } if value == mpn => Some(LintWarning::new(
                self.name(),
                "leave value blank if it's identical to MPN",
            )),
            _ => None,
        }
    }
}

/// Entity without gates
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGatesRule;

impl LintRule for NoGatesRule {
    fn name(&self) -> &'static str {
        "no-gates"
    }

    fn check(&self, target: &LintTarget<'_>) -> Option<LintWarning> {
        match target {
            LintTarget::Entity(entity) if entity.gates.is_empty() => {
                Some(LintWarning::new(self.name(), "Entity has no gates!"))
            }
            _ => None,
        }
    }
}

/// Unit without pins
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPinsRule;

impl LintRule for NoPinsRule {
    fn name(&self) -> &'static str {
        "no-pins"
    }

    fn check(&self, target: &LintTarget<'_>) -> Option<LintWarning> {
        match target {
            LintTarget::Unit(unit) if unit.pins.is_empty() => {
                Some(LintWarning::new(self.name(), "Unit has no pins!"))
            }
            _ => None,
        }
    }
}

/// Registered rules, run in registration order
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

impl RuleRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Registry with every built-in rule
    #[must_use]
    pub fn with_defaults<I, S>(forbidden_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        registry.register(WhitespaceRule);
        registry.register(ForbiddenDomainRule::new(forbidden_domains));
        registry.register(RedundantValueRule);
        registry.register(NoGatesRule);
        registry.register(NoPinsRule);
        registry
    }

    /// Register a rule
    pub fn register<R: LintRule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    /// Run every rule on a target
    #[must_use]
    pub fn check(&self, target: &LintTarget<'_>) -> Vec<LintWarning> {
        self.rules.iter().filter_map(|r| r.check(target)).collect()
    }

    /// Names of registered rules
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Number of registered rules
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if registry has no rules
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FORBIDDEN_DOMAINS;

    fn registry() -> RuleRegistry {
        RuleRegistry::with_defaults(DEFAULT_FORBIDDEN_DOMAINS)
    }

    fn messages(target: &LintTarget<'_>) -> Vec<String> {
        registry().check(target).into_iter().map(|w| w.message).collect()
    }

    #[test]
    fn leading_space_in_name() {
        assert_eq!(messages(&LintTarget::Name(" Foo")), vec!["has trailing/leading whitespace"]);
        assert!(messages(&LintTarget::Name("Foo")).is_empty());
        assert!(messages(&LintTarget::Name("")).is_empty());
    }

    #[test]
    fn only_ascii_whitespace_needs_trim() {
        assert!(WhitespaceRule::needs_trim("Timer\t"));
        assert!(!WhitespaceRule::needs_trim("Timer\u{a0}"));
        assert!(!WhitespaceRule::needs_trim("\u{3000}Timer"));
    }

    #[test]
    fn value_equal_to_mpn_fires_once() {
        let target = LintTarget::Attribute {
            key: AttributeKey::Value,
            value: "NE555",
            mpn: "NE555",
        };
        assert_eq!(messages(&target), vec!["leave value blank if it's identical to MPN"]);
    }

    #[test]
    fn empty_value_equal_to_empty_mpn_warns() {
        let target = LintTarget::Attribute {
            key: AttributeKey::Value,
            value: "",
            mpn: "",
        };
        assert_eq!(
            messages(&target),
            vec!["leave value blank if it's identical to MPN"]
        );
    }

    #[test]
    fn redundant_value_only_checks_value_key() {
        let target = LintTarget::Attribute {
            key: AttributeKey::Description,
            value: "NE555",
            mpn: "NE555",
        };
        assert!(messages(&target).is_empty());
    }

    #[test]
    fn distributor_datasheet_names_domain() {
        let target = LintTarget::Attribute {
            key: AttributeKey::Datasheet,
            value: "https://www.digikey.com/en/ne555.pdf",
            mpn: "NE555",
        };
        assert_eq!(
            messages(&target),
            vec!["forbidden domain digikey.com, use primary source"]
        );
    }

    #[test]
    fn manufacturer_datasheet_is_fine() {
        let target = LintTarget::Attribute {
            key: AttributeKey::Datasheet,
            value: "https://www.ti.com/lit/ds/symlink/ne555.pdf",
            mpn: "NE555",
        };
        assert!(messages(&target).is_empty());
    }

    #[test]
    fn empty_entity_and_unit() {
        assert_eq!(
            messages(&LintTarget::Entity(&Entity::default())),
            vec!["Entity has no gates!"]
        );
        assert_eq!(messages(&LintTarget::Unit(&Unit::default())), vec!["Unit has no pins!"]);
    }

    #[test]
    fn custom_rule_registers_without_touching_callers() {
        struct Shouting;
        impl LintRule for Shouting {
            fn name(&self) -> &'static str {
                "shouting"
            }
            fn check(&self, target: &LintTarget<'_>) -> Option<LintWarning> {
                match target {
                    LintTarget::Name(n) if n.chars().all(char::is_uppercase) => {
                        Some(LintWarning::new(self.name(), "name is all caps"))
                    }
                    _ => None,
                }
            }
        }

        let mut registry = registry();
        registry.register(Shouting);
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.check(&LintTarget::Name("ABC")).len(), 1);
    }
}
