//! Payload classification.
//!
//! Classification is a strict ordered decision list: MAC address, then GPON
//! serial, then generic serial, then unknown. The first matching rule wins,
//! which is what resolves overlaps such as a 12-character alphanumeric
//! payload that also happens to be pure hex.

use labelscan_model::{BarcodeKind, ClassifiedBarcode};

/// Manufacturer prefixes that mark a payload as a GPON serial number.
pub const GPON_PREFIXES: [&str; 5] = ["ALCL", "HWTC", "DSNW", "SCOM", "ZTEG"];

/// Classify one decoded payload, carrying the symbology through unchanged.
///
/// Returns `None` for payloads that are empty after trimming whitespace;
/// those are dropped from the scan entirely.
pub fn classify(payload: &str, symbology: &str) -> Option<ClassifiedBarcode> {
    let data = payload.trim();
    if data.is_empty() {
        return None;
    }

    let barcode = if is_mac_address(data) {
        ClassifiedBarcode::new(format_mac(data), BarcodeKind::Mac, symbology)
    } else if is_gpon_serial(data) {
        ClassifiedBarcode::new(data, BarcodeKind::GponSerial, symbology)
    } else if is_serial_number(data) {
        ClassifiedBarcode::new(data, BarcodeKind::Serial, symbology)
    } else {
        ClassifiedBarcode::new(data, BarcodeKind::Unknown, symbology)
    };

    Some(barcode)
}

/// A payload is a MAC candidate when stripping every non-alphanumeric
/// character leaves exactly 12 hex digits. Deliberately permissive: a
/// serial number that happens to be pure hex matches too, and downstream
/// consumers rely on that.
fn is_mac_address(data: &str) -> bool {
    let mut len = 0usize;
    for c in data.chars().filter(|c| c.is_ascii_alphanumeric()) {
        if !c.is_ascii_hexdigit() {
            return false;
        }
        len += 1;
    }
    len == 12
}

/// Normalize a MAC payload to `AA:BB:CC:DD:EE:FF`.
///
/// Keeps only hex characters, takes the first twelve, groups them into six
/// colon-separated pairs, and uppercases. Payloads with fewer than twelve
/// hex characters are passed through uppercased.
fn format_mac(data: &str) -> String {
    let hex: Vec<char> = data
        .chars()
        .filter(|c| c.is_ascii_hexdigit())
        .take(12)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if hex.len() < 12 {
        return data.to_ascii_uppercase();
    }

    let mut formatted = String::with_capacity(17);
    for (i, pair) in hex.chunks(2).enumerate() {
        if i > 0 {
            formatted.push(':');
        }
        formatted.extend(pair);
    }
    formatted
}

/// GPON serials either carry a known manufacturer prefix or look like four
/// letters followed by an alphanumeric tail of total length >= 12.
fn is_gpon_serial(data: &str) -> bool {
    if GPON_PREFIXES.iter().any(|prefix| data.starts_with(prefix)) {
        return true;
    }

    data.len() >= 12
        && data.chars().take(4).all(|c| c.is_ascii_alphabetic())
        && data.chars().skip(4).all(|c| c.is_ascii_alphanumeric())
}

fn is_serial_number(data: &str) -> bool {
    data.len() >= 8 && data.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(payload: &str) -> BarcodeKind {
        classify(payload, "CODE_128").expect("classified").kind
    }

    #[test]
    fn mac_with_separators_is_normalized() {
        let barcode = classify("aa-bb-cc-dd-ee-ff", "CODE_128").unwrap();
        assert_eq!(barcode.kind, BarcodeKind::Mac);
        assert_eq!(barcode.data, "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn bare_twelve_hex_chars_are_a_mac() {
        let barcode = classify("0018ee01020f", "QR_CODE").unwrap();
        assert_eq!(barcode.kind, BarcodeKind::Mac);
        assert_eq!(barcode.data, "00:18:EE:01:02:0F");
    }

    #[test]
    fn twelve_hex_letters_win_over_gpon_shape() {
        // ABCD12345678 has four leading letters and length 12, but it is
        // also pure hex, and the MAC rule is checked first.
        assert_eq!(kind_of("ABCD12345678"), BarcodeKind::Mac);
    }

    #[test]
    fn known_prefixes_classify_as_gpon() {
        for payload in
            ["ALCLB1234567", "HWTC0A2B3C4D", "DSNW1", "SCOMX", "ZTEGC0FFEE"]
        {
            let barcode = classify(payload, "CODE_128").unwrap();
            assert_eq!(barcode.kind, BarcodeKind::GponSerial, "{payload}");
            assert_eq!(barcode.data, payload, "GPON data passes through");
        }
    }

    #[test]
    fn four_letters_plus_alnum_tail_is_gpon() {
        assert_eq!(kind_of("XYZW12345678"), BarcodeKind::GponSerial);
    }

    #[test]
    fn long_alphanumeric_payload_is_a_serial() {
        assert_eq!(kind_of("SN98765432"), BarcodeKind::Serial);
    }

    #[test]
    fn short_or_punctuated_payloads_are_unknown() {
        assert_eq!(kind_of("short"), BarcodeKind::Unknown);
        assert_eq!(kind_of("http://example.com"), BarcodeKind::Unknown);
        assert_eq!(kind_of("12:34"), BarcodeKind::Unknown);
    }

    #[test]
    fn blank_payloads_are_dropped() {
        assert!(classify("", "QR_CODE").is_none());
        assert!(classify("   \t\n", "QR_CODE").is_none());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_classification() {
        let barcode = classify("  ALCLB1234567  ", "CODE_128").unwrap();
        assert_eq!(barcode.data, "ALCLB1234567");
    }

    #[test]
    fn symbology_is_carried_through() {
        let barcode = classify("SN98765432", "EAN_13").unwrap();
        assert_eq!(barcode.symbology, "EAN_13");
    }

    #[test]
    fn sixteen_hex_chars_are_not_a_mac() {
        // Stripping leaves 16 characters, so the MAC rule does not fire;
        // the payload falls through to the GPON shape rule (four leading
        // letters, alphanumeric tail, length >= 12).
        assert_eq!(kind_of("aaBBcc11dd22ee33"), BarcodeKind::GponSerial);
        // A digit-led variant skips the GPON rule and lands on serial.
        assert_eq!(kind_of("11aaBBcc22dd33ee"), BarcodeKind::Serial);
    }
}
