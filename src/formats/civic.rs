//! Layout of the human-rights, Kannada and cultural sheets: short link columns, a website
//! column, and no serial number.

use anyhow::Result;

use super::{ExtractContext, FieldExtractor};
use crate::workbook::RawRow;

const NAME: &[&str] = &["Organisation Name", "Organization Name"];
const MEMBERS: &[&str] = &["Strength"];
const INFLUENCERS: &[&str] = &["Prominent Members", "Prominent Persons"];
const FACEBOOK: &[&str] = &["FB Link", "FB"];
const INSTAGRAM: &[&str] = &["Insta Link", "Insta"];
const TWITTER: &[&str] = &["X Link", "Twitter Link"];
const YOUTUBE: &[&str] = &["Youtube Channel", "YouTube Channel"];
const LOCATION: &[&str] = &["Location", "Place"];
const PHONE: &[&str] = &["Mobile", "Mobile No"];
const EMAIL: &[&str] = &["E-mail", "E-Mail ID"];
const WEBSITE: &[&str] = &["Website", "Web Site"];

pub struct CivicFormat;

impl FieldExtractor for CivicFormat {
    fn serial(&self, _row: &RawRow, _cx: &ExtractContext) -> Result<Option<String>> {
        Ok(None)
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
        cx.text(row, LOCATION)
    }

    fn phone(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>> {
        cx.text(row, PHONE)
    }

    fn email(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>> {
        cx.text(row, EMAIL)
    }

    fn website(&self, row: &RawRow, cx: &ExtractContext) -> Result<Option<String>> {
        cx.text(row, WEBSITE)
    }
}
