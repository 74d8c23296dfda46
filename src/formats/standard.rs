//! Layout shared by the religious-group sheets and the banned-organisations list.
//!
//! The organisation name lives in the (misnamed) `Organisation Type` column.

use anyhow::Result;

use super::{ExtractContext, FieldExtractor};
use crate::workbook::RawRow;

const SERIAL: &[&str] = &["Sl. No", "Sl No", "Sl.No."];
const NAME: &[&str] = &["Organisation Type", "Organization Type"];
const MEMBERS: &[&str] = &["Total Members", "Total Memebers", "Total Member"];
const INFLUENCERS: &[&str] = &["Influencers", "Influencer"];
const FACEBOOK: &[&str] = &["Facebook URL", "Facebook Url"];
const INSTAGRAM: &[&str] = &["Instagram URL", "Instagram Url"];
const TWITTER: &[&str] = &["Twitter URL", "Twitter Url"];
const YOUTUBE: &[&str] = &["YouTube URL", "Youtube Url"];
const ADDRESS: &[&str] = &["Address"];
const PHONE: &[&str] = &["Phone Number", "Phone No", "Phone"];
const EMAIL: &[&str] = &["Email", "Email ID"];

pub struct StandardFormat;

impl FieldExtractor for StandardFormat {
    fn serial(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>> {
        cx.text(row, SERIAL)
    }

    fn name(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>> {
        cx.text(row, NAME)
    }

    fn members(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<u64>> {
        cx.count(row, MEMBERS)
    }

    fn influencers(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>> {
        cx.text(row, INFLUENCERS)
    }

    fn facebook(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>> {
        cx.text(row, FACEBOOK)
    }

    fn instagram(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>> {
        cx.text(row, INSTAGRAM)
    }

    fn twitter(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>> {
        cx.text(row, TWITTER)
    }

    fn youtube(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>> {
        cx.text(row, YOUTUBE)
    }

    fn address(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>> {
        cx.text(row, ADDRESS)
    }

    fn phone(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>> {
        cx.text(row, PHONE)
    }

    fn email(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>> {
        cx.text(row, EMAIL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::ValueCleaner;
    use crate::workbook::Cell;

    #[test]
    fn test_extract_standard_row() {
        let cleaner = ValueCleaner::default();
        let cx = ExtractContext::new("Right Hindu Groups", 1, &cleaner);
        let row = RawRow::new()
            .with("Sl. No", Cell::Number(7.0))
            .with_text("Organisation Type", " Hindu Jagruti Sena ")
            .with_text("Total Memebers", "3543")
            .with_text("Facebook URL", "https://facebook.com/hjs")
            .with_text("Twitter URL", "NIL")
            .with_text("Email", "Email ID: info@hjs.org");

        let bag = StandardFormat.extract(&row, &cx).unwrap();
        assert_eq!(bag.serial.as_deref(), Some("7"));
        assert_eq!(bag.name.as_deref(), Some("Hindu Jagruti Sena"));
        assert_eq!(bag.members, Some(3543));
        assert_eq!(bag.facebook.as_deref(), Some("https://facebook.com/hjs"));
        assert_eq!(bag.twitter, None);
        assert_eq!(bag.email.as_deref(), Some("info@hjs.org"));
        assert_eq!(bag.website, None);
    }

    #[test]
    fn test_error_cell_fails_extraction() {
        let cleaner = ValueCleaner::default();
        let cx = ExtractContext::new("Muslim Groups", 2, &cleaner);
        let row = RawRow::new()
            .with_text("Organisation Type", "Some Group")
            .with("Total Members", Cell::Error("REF!".to_string()));

        assert!(StandardFormat.extract(&row, &cx).is_err());
    }
}
