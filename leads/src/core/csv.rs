//! CSV boundary codec for import/export
//!
//! The wire format is a header row plus comma-separated records. `tags`
//! travels as one comma-joined string and is expanded to a sequence
//! internally. Values containing the delimiter, a quote, or a newline are
//! wrapped in quotes with embedded quotes doubled; the parser reverses
//! exactly that.

use shared::{BuyerLead, LeadField, LeadInput, NumericInput, TagsInput};

use crate::error::{LeadError, LeadResult};

/// Column order of the export file (also the accepted import header).
pub const EXPORT_FIELDS: [LeadField; 14] = [
    LeadField::FullName,
    LeadField::Email,
    LeadField::Phone,
    LeadField::City,
    LeadField::PropertyType,
    LeadField::Bhk,
    LeadField::Purpose,
    LeadField::BudgetMin,
    LeadField::BudgetMax,
    LeadField::Timeline,
    LeadField::Source,
    LeadField::Notes,
    LeadField::Tags,
    LeadField::Status,
];

/// Parse a header+rows CSV document into raw lead inputs.
///
/// Unknown header columns are ignored; blank lines are skipped. The
/// output is untyped, ready for `validate` in create mode.
pub fn parse_rows(text: &str) -> LeadResult<Vec<LeadInput>> {
    let table = parse_table(text)?;
    let mut records = table
        .into_iter()
        .filter(|row| row.iter().any(|field| !field.trim().is_empty()));

    let Some(header) = records.next() else {
        return Ok(Vec::new());
    };
    let header: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();

    let mut inputs = Vec::new();
    for row in records {
        let mut input = LeadInput::default();
        for (idx, value) in row.into_iter().enumerate() {
            match header.get(idx).map(String::as_str) {
                Some("fullName") => input.full_name = Some(value),
                Some("email") => input.email = Some(value),
                Some("phone") => input.phone = Some(value),
                Some("city") => input.city = Some(value),
                Some("propertyType") => input.property_type = Some(value),
                Some("bhk") => input.bhk = Some(value),
                Some("purpose") => input.purpose = Some(value),
                Some("budgetMin") => input.budget_min = Some(NumericInput::Text(value)),
                Some("budgetMax") => input.budget_max = Some(NumericInput::Text(value)),
                Some("timeline") => input.timeline = Some(value),
                Some("source") => input.source = Some(value),
                Some("notes") => input.notes = Some(value),
                Some("tags") => input.tags = Some(TagsInput::Joined(value)),
                Some("status") => input.status = Some(value),
                _ => {}
            }
        }
        inputs.push(input);
    }
    Ok(inputs)
}

/// Serialize leads to the export CSV, most fields verbatim, tags joined
/// back to a comma string, absent values as empty cells.
pub fn export(leads: &[BuyerLead]) -> String {
    let mut lines = Vec::with_capacity(leads.len() + 1);
    lines.push(
        EXPORT_FIELDS
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );
    for lead in leads {
        let row = EXPORT_FIELDS
            .iter()
            .map(|&f| escape(&lead.fields.field_as_string(f).unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }
    lines.join("\n")
}

fn escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Split a document into records and fields, honoring quoted fields with
/// doubled-quote escapes. CRLF line endings are accepted.
fn parse_table(text: &str) -> LeadResult<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => row.push(std::mem::take(&mut field)),
                '\r' => {}
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                _ => field.push(c),
            }
        }
    }
    if in_quotes {
        return Err(LeadError::InvalidCsv {
            message: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let text = "fullName,phone,city,tags\nAsha Rao,9876543210,Mohali,\"hot,nri\"\n";
        let rows = parse_rows(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].full_name.as_deref(), Some("Asha Rao"));
        assert_eq!(rows[0].city.as_deref(), Some("Mohali"));
        assert_eq!(rows[0].tags, Some(TagsInput::Joined("hot,nri".into())));
        assert!(rows[0].email.is_none());
    }

    #[test]
    fn quoted_fields_unescape_doubled_quotes() {
        let text = "fullName,notes\nRavi,\"said \"\"maybe\"\", call back\"\n";
        let rows = parse_rows(text).unwrap();
        assert_eq!(
            rows[0].notes.as_deref(),
            Some("said \"maybe\", call back")
        );
    }

    #[test]
    fn blank_lines_and_unknown_columns_are_ignored() {
        let text = "fullName,phone,mystery\n\nAsha Rao,9876543210,whatever\n\n";
        let rows = parse_rows(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].phone.as_deref(), Some("9876543210"));
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        let err = parse_rows("fullName\n\"open quote\n").unwrap_err();
        assert!(matches!(err, LeadError::InvalidCsv { .. }));
    }

    #[test]
    fn escape_wraps_and_doubles() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn export_round_trips_through_parse() {
        use chrono::Utc;
        use shared::{
            City, LeadFields, LeadId, PropertyType, Purpose, Source, Status, Timeline,
        };

        let lead = BuyerLead {
            id: LeadId::new(),
            fields: LeadFields {
                full_name: "Rao, Asha".into(),
                email: None,
                phone: "9876543210".into(),
                city: City::Zirakpur,
                property_type: PropertyType::Villa,
                bhk: Some(shared::Bhk::Three),
                purpose: Purpose::Buy,
                budget_min: Some(4_000_000),
                budget_max: None,
                timeline: Timeline::Exploring,
                source: Source::WalkIn,
                status: Status::New,
                notes: None,
                tags: Some(vec!["hot".into(), "nri".into()]),
            },
            owner_id: "agent-1".into(),
            updated_at: Utc::now(),
        };

        let csv = export(&[lead]);
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("fullName,email,phone"));
        assert_eq!(
            lines.next().unwrap(),
            "\"Rao, Asha\",,9876543210,Zirakpur,Villa,3,Buy,4000000,,Exploring,Walk-in,,\"hot,nri\",New"
        );

        let parsed = parse_rows(&csv).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].full_name.as_deref(), Some("Rao, Asha"));
        assert_eq!(parsed[0].bhk.as_deref(), Some("3"));
    }
}
