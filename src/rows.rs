//! CSV Input Rows
//!
//! One [`ProfileRow`] per data line of the import file. Columns are matched
//! by header name; unknown columns are ignored and absent or empty cells
//! become `None`.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{IseError, Result};

/// A single authorization profile row as read from the CSV. Cell values are
/// kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRow {
    pub name: Option<String>,
    pub access_type: Option<String>,
    pub description: Option<String>,
    pub dacl_name: Option<String>,
    pub authz_profile_type: Option<String>,
    pub vlan_name_id: Option<String>,
    pub web_redirection_type: Option<String>,
    pub acl: Option<String>,
    pub portal_name: Option<String>,
    pub voice_domain_permission: Option<String>,
}

impl ProfileRow {
    fn from_record(record: &StringRecord, header_map: &HashMap<String, usize>) -> Self {
        let field = |name: &str| get_field(record, header_map, name);
        Self {
            name: field("name"),
            access_type: field("accessType"),
            description: field("description"),
            dacl_name: field("daclName"),
            authz_profile_type: field("authzProfileType"),
            vlan_name_id: field("vlan_nameID"),
            web_redirection_type: field("WebRedirectionType"),
            acl: field("acl"),
            portal_name: field("portalName"),
            voice_domain_permission: field("voiceDomainPermission"),
        }
    }
}

/// A parsed row together with its 1-based line number in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedRow {
    pub line: usize,
    pub row: ProfileRow,
}

/// Read and parse the CSV file at `path`
pub fn read_rows(path: &Path) -> Result<Vec<NumberedRow>> {
    let content = fs::read_to_string(path).map_err(|source| IseError::CsvRead {
        path: path.display().to_string(),
        source,
    })?;
    parse_rows(&content)
}

/// Parse CSV text with a header row. A leading UTF-8 byte-order mark is
/// ignored. Header names are trimmed; cell values are not.
pub fn parse_rows(content: &str) -> Result<Vec<NumberedRow>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(content.as_bytes());

    let headers = rdr.headers()?.clone();
    let header_map = build_header_map(&headers);

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let line = idx + 2; // header is line 1
        let record = result?;
        rows.push(NumberedRow {
            line,
            row: ProfileRow::from_record(&record, &header_map),
        });
    }

    debug!("Parsed {} CSV rows", rows.len());
    Ok(rows)
}

/// Map header name to column index. A repeated column resolves to its last
/// occurrence.
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), i))
        .collect()
}

/// Cell value for `field`, `None` when the column or cell is absent or the
/// cell is empty
fn get_field(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Option<String> {
    header_map
        .get(field)
        .and_then(|&idx| record.get(idx))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognized_columns() {
        let csv = "name,accessType,description,daclName,authzProfileType,vlan_nameID,WebRedirectionType,acl,portalName,voiceDomainPermission\n\
                   Guest_Redirect,ACCESS_ACCEPT,Guest portal,PERMIT_ALL,SWITCH,20,CentralizedWebAuth,ACL_WEBAUTH,Guest Portal,yes\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 2);

        let row = &rows[0].row;
        assert_eq!(row.name.as_deref(), Some("Guest_Redirect"));
        assert_eq!(row.access_type.as_deref(), Some("ACCESS_ACCEPT"));
        assert_eq!(row.description.as_deref(), Some("Guest portal"));
        assert_eq!(row.dacl_name.as_deref(), Some("PERMIT_ALL"));
        assert_eq!(row.authz_profile_type.as_deref(), Some("SWITCH"));
        assert_eq!(row.vlan_name_id.as_deref(), Some("20"));
        assert_eq!(row.web_redirection_type.as_deref(), Some("CentralizedWebAuth"));
        assert_eq!(row.acl.as_deref(), Some("ACL_WEBAUTH"));
        assert_eq!(row.portal_name.as_deref(), Some("Guest Portal"));
        assert_eq!(row.voice_domain_permission.as_deref(), Some("yes"));
    }

    #[test]
    fn test_bom_is_stripped() {
        let csv = "\u{feff}name,accessType\nP1,ACCESS_ACCEPT\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].row.name.as_deref(), Some("P1"));
    }

    #[test]
    fn test_missing_columns_and_empty_cells_are_none() {
        let csv = "accessType,description,extra\nACCESS_REJECT,,ignored\n";
        let rows = parse_rows(csv).unwrap();
        let row = &rows[0].row;
        assert_eq!(row.name, None);
        assert_eq!(row.access_type.as_deref(), Some("ACCESS_REJECT"));
        assert_eq!(row.description, None);
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let csv = "name,accessType,vlan_nameID\nP1,ACCESS_ACCEPT\nP2,ACCESS_ACCEPT,30\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row.vlan_name_id, None);
        assert_eq!(rows[1].row.vlan_name_id.as_deref(), Some("30"));
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn test_cell_values_are_kept_verbatim() {
        let csv = "name , accessType,description\n P1 ,ACCESS_ACCEPT,\"  Corp wired  \"\n";
        let rows = parse_rows(csv).unwrap();
        let row = &rows[0].row;
        assert_eq!(row.name.as_deref(), Some(" P1 "));
        assert_eq!(row.description.as_deref(), Some("  Corp wired  "));
    }

    #[test]
    fn test_whitespace_only_cell_is_a_value() {
        let csv = "name,accessType\n   ,ACCESS_ACCEPT\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].row.name.as_deref(), Some("   "));
    }

    #[test]
    fn test_repeated_column_uses_last_value() {
        let csv = "name,accessType,name\nFirst,ACCESS_ACCEPT,Second\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].row.name.as_deref(), Some("Second"));
        assert_eq!(rows[0].row.access_type.as_deref(), Some("ACCESS_ACCEPT"));
    }

    #[test]
    fn test_read_rows_missing_file() {
        let err = read_rows(Path::new("/nonexistent/AP.csv")).unwrap_err();
        assert!(matches!(err, IseError::CsvRead { .. }));
    }
}
