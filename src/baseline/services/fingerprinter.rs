use crate::baseline::domain::ControlRecord;
use sha2::{Digest, Sha256};

/// Fingerprinter service computing a canonical content digest of a control
///
/// Covers exactly the fields that decide whether a control's substance
/// changed: title, severity, discussion, check text, fix text and the
/// manual-review flag. Identifiers (local, rule, vuln) are not part of it.
pub struct Fingerprinter;

impl Fingerprinter {
    /// Returns the hex-encoded SHA-256 fingerprint (64 characters)
    ///
    /// Each field is fed as `name`, byte length, bytes, in a fixed order, so
    /// no two distinct field tuples can produce the same hash input.
    pub fn fingerprint(control: &ControlRecord) -> String {
        let mut hasher = Sha256::new();
        Self::feed(&mut hasher, "title", control.title.as_bytes());
        Self::feed(&mut hasher, "severity", control.severity.as_bytes());
        Self::feed(&mut hasher, "discussion", control.discussion.as_bytes());
        Self::feed(&mut hasher, "check_text", control.check_text.as_bytes());
        Self::feed(&mut hasher, "fix_text", control.fix_text.as_bytes());
        Self::feed(
            &mut hasher,
            "is_manual",
            if control.is_manual { b"1" } else { b"0" },
        );
        hex::encode(hasher.finalize())
    }

    fn feed(hasher: &mut Sha256, name: &str, value: &[u8]) {
        hasher.update(name.as_bytes());
        hasher.update((value.len() as u64).to_le_bytes());
        hasher.update(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control() -> ControlRecord {
        ControlRecord::new("1", Some("SV-1"), Some("V-1"))
            .with_title("Disable SMBv1")
            .with_severity("high")
            .with_discussion("SMBv1 is insecure")
            .with_check_text("Get-SmbServerConfiguration")
            .with_fix_text("Set-SmbServerConfiguration -EnableSMB1Protocol $false")
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let a = Fingerprinter::fingerprint(&control());
        let b = Fingerprinter::fingerprint(&control());
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_fingerprint_ignores_identifiers() {
        let mut other = control();
        other.local_id = "999".to_string();
        other.rule_id = Some("SV-1r2_rule".to_string());
        other.vuln_id = None;
        assert_eq!(
            Fingerprinter::fingerprint(&control()),
            Fingerprinter::fingerprint(&other)
        );
    }

    #[test]
    fn test_fingerprint_detects_each_field() {
        let base = Fingerprinter::fingerprint(&control());
        let variants = [
            control().with_title("Other"),
            control().with_severity("medium"),
            control().with_discussion("Other"),
            control().with_check_text("Other"),
            control().with_fix_text("Other"),
            control().with_manual(true),
        ];
        for variant in variants {
            assert_ne!(base, Fingerprinter::fingerprint(&variant));
        }
    }

    #[test]
    fn test_fingerprint_field_boundaries() {
        let a = ControlRecord::default().with_title("ab").with_severity("c");
        let b = ControlRecord::default().with_title("a").with_severity("bc");
        assert_ne!(Fingerprinter::fingerprint(&a), Fingerprinter::fingerprint(&b));
    }
}
