//! Layout of the party, student, farmer and union sheets.
//!
//! These sheets never had a YouTube column, and Twitter is recorded as a handle.

use anyhow::Result;

use super::{ExtractContext, FieldExtractor};
use crate::workbook::RawRow;

const SERIAL: &[&str] = &["S.No", "S. No", "S No"];
const NAME: &[&str] = &["Name of the Organisation", "Name of the Organization", "Name"];
const MEMBERS: &[&str] = &["Members Count", "Members"];
const INFLUENCERS: &[&str] = &["Key Leaders", "Leaders"];
const FACEBOOK: &[&str] = &["Facebook"];
const INSTAGRAM: &[&str] = &["Instagram"];
const TWITTER: &[&str] = &["Twitter Handle", "Twitter"];
const ADDRESS: &[&str] = &["Office Address", "Address"];
const PHONE: &[&str] = &["Contact", "Contact No"];
const EMAIL: &[&str] = &["Mail ID", "Mail Id", "Email"];

pub struct PoliticalFormat;

impl FieldExtractor for PoliticalFormat {
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

    fn youtube(&self, _row: &RawRow, _cx: &ExtractContext) -> Result<Option<String>> {
        Ok(None)
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
