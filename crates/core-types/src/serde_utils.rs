//! Shared serialization helpers for the service DTOs.

/// (De)serializes a JSON object of `name -> number` as a `Vec` of pairs, keeping
/// the order in which the service wrote the keys.
pub mod ordered_shares {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(shares: &[(String, f64)], s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = s.serialize_map(Some(shares.len()))?;
        for (name, share) in shares {
            map.serialize_entry(name, share)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Vec<(String, f64)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SharesVisitor;

        impl<'de> Visitor<'de> for SharesVisitor {
            type Value = Vec<(String, f64)>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of partner name to share")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut shares = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, share)) = access.next_entry::<String, f64>()? {
                    shares.push((name, share));
                }
                Ok(shares)
            }
        }

        d.deserialize_map(SharesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::SectorDetail;

    #[test]
    fn partner_shares_keep_service_order() {
        let json = r#"{
            "sector_id": "72",
            "sector_name": "Iron and steel",
            "total_exports": 1000000.0,
            "partner_shares": {"A": 0.1, "B": 0.6, "C": 0.3},
            "top_partner": "B",
            "top_partner_share": 0.6
        }"#;

        let detail: SectorDetail = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = detail.partner_shares.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);

        let back = serde_json::to_value(&detail).unwrap();
        assert_eq!(back["partner_shares"]["B"], 0.6);
    }
}
