use crate::sheets::DataSourceError;
use url::Url;

/// Extracts the spreadsheet key from a Google Sheets URL, either the `/spreadsheets/d/<key>` path form or the legacy
/// `?key=<key>` form.
pub fn spreadsheet_key(sheet_url: &str) -> Result<String, DataSourceError> {
    let invalid = || DataSourceError::InvalidSheetUrl(sheet_url.to_string());
    let url = Url::parse(sheet_url.trim()).map_err(|_| invalid())?;

    // Multi-account links put `/u/<n>` between `spreadsheets` and `d`
    let from_path = url.path_segments().and_then(|segments| {
        let segments = segments.collect::<Vec<_>>();
        if segments.first() != Some(&"spreadsheets") {
            return None;
        }
        let d = segments.iter().position(|segment| *segment == "d")?;
        segments.get(d + 1).map(|key| key.to_string())
    });

    from_path
        .or_else(|| url.query_pairs().find(|(name, _)| name == "key").map(|(_, value)| value.into_owned()))
        .filter(|key| !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .ok_or_else(invalid)
}
