use crate::baseline::domain::{ControlKey, ControlOverride, ControlRecord, KeySource};

/// KeyResolver service for deriving stable cross-pack control identities
///
/// The pack-local control id is regenerated on every import, so joining on it
/// would report every control as both removed and added. Controls are joined
/// on the vendor rule id instead, falling back to the vendor vuln id.
pub struct KeyResolver;

impl KeyResolver {
    /// Resolves the join key of a control record
    ///
    /// # Returns
    /// `None` when the control has neither a rule id nor a vuln id; such
    /// controls are excluded from keyed comparison.
    pub fn resolve(control: &ControlRecord) -> Option<ControlKey> {
        Self::from_ids(control.rule_id.as_deref(), control.vuln_id.as_deref())
    }

    /// Resolves the join key of an overlay override using the same rules
    pub fn resolve_override(control_override: &ControlOverride) -> Option<ControlKey> {
        Self::from_ids(
            control_override.rule_id.as_deref(),
            control_override.vuln_id.as_deref(),
        )
    }

    /// Trims and lowercases an identifier; blank identifiers count as absent
    pub fn normalize(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    fn from_ids(rule_id: Option<&str>, vuln_id: Option<&str>) -> Option<ControlKey> {
        rule_id
            .and_then(Self::normalize)
            .map(|value| ControlKey::new(KeySource::RuleId, value))
            .or_else(|| {
                vuln_id
                    .and_then(Self::normalize)
                    .map(|value| ControlKey::new(KeySource::VulnId, value))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_rule_id() {
        let control = ControlRecord::new("17", Some("SV-253256r828864_rule"), Some("V-253256"));
        let key = KeyResolver::resolve(&control).unwrap();
        assert_eq!(key.source(), KeySource::RuleId);
        assert_eq!(key.value(), "sv-253256r828864_rule");
    }

    #[test]
    fn test_resolve_is_trimmed_and_case_insensitive() {
        let a = ControlRecord::new("1", Some("  SV-100_rule "), None);
        let b = ControlRecord::new("2", Some("sv-100_RULE"), None);
        assert_eq!(KeyResolver::resolve(&a), KeyResolver::resolve(&b));
    }

    #[test]
    fn test_resolve_ignores_local_id() {
        let a = ControlRecord::new("import-1-0001", Some("SV-1"), None);
        let b = ControlRecord::new("import-2-0999", Some("SV-1"), None);
        assert_eq!(KeyResolver::resolve(&a), KeyResolver::resolve(&b));
    }

    #[test]
    fn test_resolve_falls_back_to_vuln_id() {
        let control = ControlRecord::new("1", None, Some("V-220"));
        let key = KeyResolver::resolve(&control).unwrap();
        assert_eq!(key.source(), KeySource::VulnId);
        assert_eq!(key.value(), "v-220");

        let blank_rule = ControlRecord::new("1", Some("   "), Some("V-220"));
        assert_eq!(KeyResolver::resolve(&blank_rule), Some(key));
    }

    #[test]
    fn test_resolve_none_without_identifiers() {
        let control = ControlRecord::new("1", None, Some(""));
        assert!(KeyResolver::resolve(&control).is_none());
    }

    #[test]
    fn test_resolve_override_matches_control() {
        let control = ControlRecord::new("9", Some("SV-5r2_rule"), Some("V-5"));
        let ov = ControlOverride::new(Some("sv-5R2_RULE"), None).unwrap();
        assert_eq!(
            KeyResolver::resolve_override(&ov),
            KeyResolver::resolve(&control)
        );
    }
}
