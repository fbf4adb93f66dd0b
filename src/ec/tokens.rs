//! Shared regex fragments for enumeration/chronology grammars.
//!
//! Each fragment captures into the named group matching a
//! [`Feature`](super::features::Feature) wire name. Grammars compose
//! fragments with `format!` into full patterns; [`PatternSet`] anchors and
//! compiles them.
//!
//! Input reaching these fragments has been through default preprocessing:
//! uppercased, whitespace collapsed, copy annotations stripped.

/// Volume: "V. 48", "V.48", "V 48", "VOL. 48", "VOLUME 48".
pub const VOLUME: &str = r"V(?:OL(?:UME)?)?\.?\s*(?P<volume>\d{1,4})";

/// Volume range: "V. 12-14".
pub const VOLUME_RANGE: &str =
    r"V(?:OL(?:UME)?)?S?\.?\s*(?P<start_volume>\d{1,4})\s*[-/]\s*(?P<end_volume>\d{1,4})";

/// Issue number: "NO. 4", "NO.4", "NOS. 4".
pub const NUMBER: &str = r"NOS?\.?\s*(?P<number>\d{1,5}[A-Z]?)";

/// Issue-number range: "NO. 201-250", "NOS. 4/7".
pub const NUMBER_RANGE: &str =
    r"NOS?\.?\s*(?P<start_number>\d{1,5})\s*[-/]\s*(?P<end_number>\d{1,5})";

/// Four-digit year, 1600 through 2099.
pub const YEAR: &str = r"(?P<year>1[6-9]\d{2}|20\d{2})";

/// Year range; the end year may be 2, 3, or 4 digits and is widened by
/// postprocessing ("1995-98" => 1995..1998).
pub const YEAR_RANGE: &str =
    r"(?P<start_year>1[6-9]\d{2}|20\d{2})\s*[-/]\s*(?P<end_year>\d{2,4})";

/// Month name or abbreviation; fuzzy forms resolved by postprocessing.
pub const MONTH: &str = r"(?P<month>[A-Z]{2,9})\.?";

/// Month range: "JAN.-MAR.", "JAN/JUNE".
pub const MONTH_RANGE: &str = r"(?P<start_month>[A-Z]{2,9})\.?\s*[-/]\s*(?P<end_month>[A-Z]{2,9})\.?";

/// Day of month, 1-2 digits.
pub const DAY: &str = r"(?P<day>[0-3]?\d)";

/// Day range within one month: "5-11".
pub const DAY_RANGE: &str = r"(?P<start_day>[0-3]?\d)\s*-\s*(?P<end_day>[0-3]?\d)";

/// Part: "PT. 2", "PART 2", "PT. 10A".
pub const PART: &str = r"P(?:T|ART)\.?\s*(?P<part>\d{1,3}[A-Z]?)";

/// Part range: "PT. 1-3".
pub const PART_RANGE: &str = r"P(?:T|ART)S?\.?\s*(?P<start_part>\d{1,3})\s*-\s*(?P<end_part>\d{1,3})";

/// Page range: "PP. 1035-1986", "P. 7-19".
pub const PAGES: &str = r"P{1,2}\.?\s*(?P<start_page>\d{1,5})\s*-\s*(?P<end_page>\d{1,5})";

/// Supplement marker, with optional ordinal: "SUP.", "SUPP. 2", "SUPPLEMENT".
pub const SUPPLEMENT: &str = r"(?P<supplement>SUPP?(?:LEMENT)?\.?\s*\d{0,3})";

/// Book designation used by multi-book annuals: "BK. 2", "BOOK 2".
pub const BOOK: &str = r"B(?:K|OOK)\.?\s*(?P<book>\d{1,2})";

/// Congress/session enumeration: "99TH CONG., 1ST SESS.".
pub const CONGRESS: &str = r"(?P<congress>\d{1,3})(?:ST|ND|RD|TH)?\s*CONG(?:RESS)?\.?";
pub const SESSION: &str = r"(?P<session>[1-3])(?:ST|ND|RD)?\s*SESS(?:ION)?\.?";

/// Edition year used by annuals that enumerate by edition: "1984 ED.".
pub const EDITION: &str = r"(?P<edition>\d{1,4})(?:ST|ND|RD|TH)?\s*ED(?:ITION)?\.?";

/// Trailing copy/withdrawal annotations stripped by preprocessing:
/// "C. 2", "COP. 3", "(2ND COPY)", "WD", "WITHDRAWN".
pub const COPY_NOISE: &str =
    r"(?:\s*\(?(?:C(?:OP(?:Y)?)?\.?\s*\d{1,2}|\d{1,2}(?:ST|ND|RD|TH)\s*COPY|WD|WITHDRAWN)\)?)+$";

/// Flexible separator between enumeration and chronology segments.
pub const SEP: &str = r"[\s:,;]+";

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn whole(frag: &str) -> Regex {
        Regex::new(&format!("^{frag}$")).unwrap()
    }

    #[test]
    fn volume_forms() {
        let re = whole(VOLUME);
        for s in ["V. 48", "V.48", "V 48", "VOL. 48", "VOLUME 48"] {
            let caps = re.captures(s).unwrap_or_else(|| panic!("no match: {s}"));
            assert_eq!(&caps["volume"], "48");
        }
    }

    #[test]
    fn number_range_captures_both_ends() {
        let caps = whole(NUMBER_RANGE).captures("NO. 201-250").unwrap();
        assert_eq!(&caps["start_number"], "201");
        assert_eq!(&caps["end_number"], "250");
    }

    #[test]
    fn year_rejects_implausible_centuries() {
        let re = whole(YEAR);
        assert!(re.is_match("1983"));
        assert!(re.is_match("2025"));
        assert!(!re.is_match("1492"));
        assert!(!re.is_match("983"));
    }

    #[test]
    fn year_range_allows_short_end() {
        let caps = whole(YEAR_RANGE).captures("1995-98").unwrap();
        assert_eq!(&caps["start_year"], "1995");
        assert_eq!(&caps["end_year"], "98");
    }
}
