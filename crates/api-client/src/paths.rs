use crate::error::ApiError;
use core_types::ActualTariffsQuery;

/// Percent-escapes a single URL component.
///
/// Everything outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is encoded as UTF-8 `%XX`
/// triplets, so reserved characters such as `/`, `,`, `?` and `&` never leak into
/// the surrounding path or query.
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// `/api/sector/{id}` with the id escaped.
pub fn sector_path(sector_id: &str) -> String {
    format!("/api/sector/{}", encode_component(sector_id))
}

/// `/api/baseline`, scoped with `?sectors=a,b` only when a non-empty list is given.
/// Each identifier is escaped on its own; the separating commas are literal.
pub fn baseline_path(sectors: Option<&[String]>) -> String {
    match sectors {
        Some(ids) if !ids.is_empty() => {
            let joined = ids
                .iter()
                .map(|id| encode_component(id))
                .collect::<Vec<_>>()
                .join(",");
            format!("/api/baseline?sectors={joined}")
        }
        _ => "/api/baseline".to_string(),
    }
}

/// `/api/actual-tariffs` with only the non-empty parameters in its query.
pub fn actual_tariffs_path(query: &ActualTariffsQuery) -> Result<String, ApiError> {
    if query.is_empty() {
        return Ok("/api/actual-tariffs".to_string());
    }
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    Ok(format!("/api/actual-tariffs?{qs}"))
}
