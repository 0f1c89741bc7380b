//! Header and NAMESTR records of a version 5 transport file.
//!
//! Every header is one 80-byte record starting with a fixed 48-byte prefix.
//! Variable descriptors (NAMESTR) are 140 bytes each, packed back to back and
//! padded to a record boundary.

use super::XptError;

pub(crate) const RECORD_LEN: usize = 80;

pub(crate) const LIBRARY_HEADER_PREFIX: &str =
    "HEADER RECORD*******LIBRARY HEADER RECORD!!!!!!!";
pub(crate) const MEMBER_HEADER_PREFIX: &str = "HEADER RECORD*******MEMBER  HEADER RECORD!!!!!!!";
pub(crate) const DSCRPTR_HEADER_PREFIX: &str =
    "HEADER RECORD*******DSCRPTR HEADER RECORD!!!!!!!";
pub(crate) const NAMESTR_HEADER_PREFIX: &str =
    "HEADER RECORD*******NAMESTR HEADER RECORD!!!!!!!";
pub(crate) const OBS_HEADER_PREFIX: &str = "HEADER RECORD*******OBS     HEADER RECORD!!!!!!!";

/// Shortest NAMESTR we accept; VAX/VMS writers emit 136 bytes.
const MIN_NAMESTR_LEN: usize = 88;

/// Storage type of a SAS variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SasKind {
    Numeric,
    Character,
}

/// One variable as described by its NAMESTR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SasVariable {
    pub name: String,
    pub label: Option<String>,
    pub kind: SasKind,
    pub length: usize,
}

pub(crate) fn expect_header(
    record: &[u8],
    prefix: &'static str,
    expected: &'static str,
) -> Result<(), XptError> {
    if record.starts_with(prefix.as_bytes()) {
        Ok(())
    } else {
        Err(XptError::MissingHeader { expected })
    }
}

pub(crate) fn is_header(record: &[u8], prefix: &str) -> bool {
    record.starts_with(prefix.as_bytes())
}

/// NAMESTR length from the member header (offset 74, 4 ASCII digits).
pub(crate) fn parse_namestr_len(record: &[u8]) -> Result<usize, XptError> {
    parse_digits(record, 74, "NAMESTR length")
}

/// Variable count from the NAMESTR header (offset 54, 4 ASCII digits).
pub(crate) fn parse_variable_count(record: &[u8]) -> Result<usize, XptError> {
    parse_digits(record, 54, "variable count")
}

fn parse_digits(record: &[u8], offset: usize, field: &'static str) -> Result<usize, XptError> {
    read_string(record, offset, 4)
        .trim()
        .parse::<usize>()
        .map_err(|_| XptError::NumericParse { field })
}

/// Dataset name from the member data record (offset 8, 8 chars).
pub(crate) fn parse_dataset_name(record: &[u8]) -> Result<String, XptError> {
    let name = read_string(record, 8, 8);
    if name.is_empty() {
        return Err(XptError::invalid_format("empty dataset name"));
    }
    Ok(name)
}

/// Dataset label from the second member record (offset 32, 40 chars).
pub(crate) fn parse_dataset_label(record: &[u8]) -> Option<String> {
    let label = read_string(record, 32, 40);
    if label.is_empty() { None } else { Some(label) }
}

pub(crate) fn align_to_record(offset: usize) -> usize {
    offset.div_ceil(RECORD_LEN) * RECORD_LEN
}

pub(crate) fn parse_namestr_records(
    data: &[u8],
    var_count: usize,
    namestr_len: usize,
) -> Result<Vec<SasVariable>, XptError> {
    if namestr_len < MIN_NAMESTR_LEN {
        return Err(XptError::invalid_format(format!(
            "NAMESTR length {namestr_len} is too short"
        )));
    }
    (0..var_count)
        .map(|index| {
            let start = index * namestr_len;
            let record = data
                .get(start..start + namestr_len)
                .ok_or(XptError::RecordOutOfBounds { offset: start })?;
            parse_namestr(record, index)
        })
        .collect()
}

fn parse_namestr(data: &[u8], index: usize) -> Result<SasVariable, XptError> {
    let kind = match read_i16(data, 0) {
        1 => SasKind::Numeric,
        2 => SasKind::Character,
        other => {
            return Err(XptError::InvalidNamestr {
                index,
                message: format!("invalid ntype: {other}"),
            });
        }
    };

    let length = usize::try_from(read_i16(data, 4)).unwrap_or(0);
    if length == 0 {
        return Err(XptError::InvalidNamestr {
            index,
            message: "variable length is zero".to_string(),
        });
    }

    let name = read_string(data, 8, 8);
    if name.is_empty() {
        return Err(XptError::InvalidNamestr {
            index,
            message: "empty variable name".to_string(),
        });
    }

    let label = read_string(data, 16, 40);
    Ok(SasVariable {
        name,
        label: if label.is_empty() { None } else { Some(label) },
        kind,
        length,
    })
}

fn read_i16(data: &[u8], offset: usize) -> i16 {
    data.get(offset..offset + 2)
        .map(|bytes| i16::from_be_bytes([bytes[0], bytes[1]]))
        .unwrap_or(0)
}

/// Read a string from a byte slice, trimming trailing spaces.
pub(crate) fn read_string(data: &[u8], offset: usize, len: usize) -> String {
    data.get(offset..offset + len)
        .map(|slice| String::from_utf8_lossy(slice).trim_end().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod testing {
    //! Builders for hand-assembled transport files.

    use super::*;

    pub(crate) fn fixed_header(prefix: &str) -> [u8; RECORD_LEN] {
        let mut record = [b' '; RECORD_LEN];
        record[..prefix.len()].copy_from_slice(prefix.as_bytes());
        record[48..78].fill(b'0');
        record
    }

    pub(crate) fn write_string(buf: &mut [u8], offset: usize, value: &str) {
        buf[offset..offset + value.len()].copy_from_slice(value.as_bytes());
    }

    pub(crate) fn namestr(kind: SasKind, length: i16, name: &str, label: &str) -> [u8; 140] {
        let mut buf = [0u8; 140];
        let ntype: i16 = match kind {
            SasKind::Numeric => 1,
            SasKind::Character => 2,
        };
        buf[0..2].copy_from_slice(&ntype.to_be_bytes());
        buf[4..6].copy_from_slice(&length.to_be_bytes());
        buf[8..56].fill(b' ');
        write_string(&mut buf, 8, name);
        write_string(&mut buf, 16, label);
        buf
    }

    /// A complete single-member file for the given variables and observation bytes.
    pub(crate) fn xport_file(name: &str, variables: &[[u8; 140]], observations: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&fixed_header(LIBRARY_HEADER_PREFIX));
        out.extend_from_slice(&[b' '; RECORD_LEN * 2]);

        let mut member = fixed_header(MEMBER_HEADER_PREFIX);
        write_string(&mut member, 74, "0140");
        out.extend_from_slice(&member);
        out.extend_from_slice(&fixed_header(DSCRPTR_HEADER_PREFIX));

        let mut member_data = [b' '; RECORD_LEN];
        write_string(&mut member_data, 0, "SAS     ");
        write_string(&mut member_data, 8, name);
        out.extend_from_slice(&member_data);
        let mut member_second = [b' '; RECORD_LEN];
        write_string(&mut member_second, 32, "Test data");
        out.extend_from_slice(&member_second);

        let mut namestr_header = fixed_header(NAMESTR_HEADER_PREFIX);
        write_string(&mut namestr_header, 54, &format!("{:04}", variables.len()));
        out.extend_from_slice(&namestr_header);
        for variable in variables {
            out.extend_from_slice(variable);
        }
        out.resize(align_to_record(out.len()), b' ');

        out.extend_from_slice(&fixed_header(OBS_HEADER_PREFIX));
        out.extend_from_slice(observations);
        out.resize(align_to_record(out.len()), b' ');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_expect_header() {
        let record = fixed_header(OBS_HEADER_PREFIX);
        assert!(expect_header(&record, OBS_HEADER_PREFIX, "OBS HEADER").is_ok());
        assert!(matches!(
            expect_header(&record, MEMBER_HEADER_PREFIX, "MEMBER HEADER"),
            Err(XptError::MissingHeader {
                expected: "MEMBER HEADER"
            })
        ));
    }

    #[test]
    fn test_parse_counts() {
        let mut member = fixed_header(MEMBER_HEADER_PREFIX);
        write_string(&mut member, 74, "0140");
        assert_eq!(parse_namestr_len(&member).unwrap(), 140);

        let mut namestr_header = fixed_header(NAMESTR_HEADER_PREFIX);
        write_string(&mut namestr_header, 54, "0003");
        assert_eq!(parse_variable_count(&namestr_header).unwrap(), 3);
    }

    #[test]
    fn test_parse_namestr() {
        let record = namestr(SasKind::Character, 12, "REGION", "Sales region");
        let variable = parse_namestr(&record, 0).unwrap();
        assert_eq!(variable.name, "REGION");
        assert_eq!(variable.label.as_deref(), Some("Sales region"));
        assert_eq!(variable.kind, SasKind::Character);
        assert_eq!(variable.length, 12);
    }

    #[test]
    fn test_parse_namestr_rejects_bad_type() {
        let mut record = namestr(SasKind::Numeric, 8, "X", "");
        record[1] = 7;
        assert!(matches!(
            parse_namestr(&record, 4),
            Err(XptError::InvalidNamestr { index: 4, .. })
        ));
    }

    #[test]
    fn test_align_to_record() {
        assert_eq!(align_to_record(0), 0);
        assert_eq!(align_to_record(140), 160);
        assert_eq!(align_to_record(160), 160);
    }
}
