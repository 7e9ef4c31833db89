//! Codec for the volatile-data blob: fixed-width binary records carrying
//! EDHREC rank and prices per printing. The blob is a flat sequence of
//! 44-byte records with no header or framing.

use std::collections::HashMap;

use uuid::Uuid;

/// Size of one record: 16-byte printing id, a u32 rank, six u32 prices.
pub const RECORD_LEN: usize = 44;

/// Null marker for the rank and every price field.
const SENTINEL: u32 = 0xFFFF_FFFF;

/// Rank and prices for one printing. Prices are in whole currency units
/// (the wire format carries cents).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolatileRecord {
    pub edhrec_rank: Option<u32>,
    pub usd: Option<f64>,
    pub usd_foil: Option<f64>,
    pub usd_etched: Option<f64>,
    pub eur: Option<f64>,
    pub eur_foil: Option<f64>,
    pub tix: Option<f64>,
}

#[derive(thiserror::Error, Debug)]
pub enum VolatileError {
    #[error("malformed volatile data: {len} bytes is not a multiple of {RECORD_LEN}")]
    Malformed { len: usize },
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn read_price(bytes: &[u8], offset: usize) -> Option<f64> {
    match read_u32(bytes, offset) {
        SENTINEL => None,
        cents => Some(cents as f64 / 100.0),
    }
}

fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn write_price(out: &mut Vec<u8>, price: Option<f64>) {
    write_u32(out, price.map_or(SENTINEL, |p| (p * 100.0).round() as u32));
}

/// Decode a volatile blob into a map keyed by printing id. The blob length
/// must be an exact multiple of [`RECORD_LEN`].
pub fn decode(bytes: &[u8]) -> Result<HashMap<Uuid, VolatileRecord>, VolatileError> {
    if bytes.len() % RECORD_LEN != 0 {
        return Err(VolatileError::Malformed { len: bytes.len() });
    }

    let mut records = HashMap::with_capacity(bytes.len() / RECORD_LEN);
    for chunk in bytes.chunks_exact(RECORD_LEN) {
        let mut id = [0u8; 16];
        id.copy_from_slice(&chunk[..16]);
        let record = VolatileRecord {
            edhrec_rank: match read_u32(chunk, 16) {
                SENTINEL => None,
                rank => Some(rank),
            },
            usd: read_price(chunk, 20),
            usd_foil: read_price(chunk, 24),
            usd_etched: read_price(chunk, 28),
            eur: read_price(chunk, 32),
            eur_foil: read_price(chunk, 36),
            tix: read_price(chunk, 40),
        };
        records.insert(Uuid::from_bytes(id), record);
    }
    Ok(records)
}

/// Encode records back into the wire format. The inverse of [`decode`];
/// used by data tooling and the round-trip tests.
pub fn encode<'a, I>(records: I) -> Vec<u8>
where
    I: IntoIterator<Item = (&'a Uuid, &'a VolatileRecord)>,
{
    let mut out = Vec::new();
    for (id, record) in records {
        out.extend_from_slice(id.as_bytes());
        write_u32(&mut out, record.edhrec_rank.unwrap_or(SENTINEL));
        write_price(&mut out, record.usd);
        write_price(&mut out, record.usd_foil);
        write_price(&mut out, record.usd_etched);
        write_price(&mut out, record.eur);
        write_price(&mut out, record.eur_foil);
        write_price(&mut out, record.tix);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Uuid, VolatileRecord) {
        (
            Uuid::from_u128(0xDEAD_BEEF),
            VolatileRecord {
                edhrec_rank: Some(1234),
                usd: Some(0.25),
                usd_foil: Some(19.99),
                usd_etched: None,
                eur: Some(0.18),
                eur_foil: None,
                tix: Some(0.02),
            },
        )
    }

    #[test]
    fn round_trip_preserves_nulls() {
        let (id, record) = sample();
        let mut records = HashMap::new();
        records.insert(id, record.clone());

        let bytes = encode(&records);
        assert_eq!(bytes.len(), RECORD_LEN);

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[&id], record);
    }

    #[test]
    fn all_null_record_round_trips() {
        let id = Uuid::from_u128(7);
        let mut records = HashMap::new();
        records.insert(id, VolatileRecord::default());

        let decoded = decode(&encode(&records)).unwrap();
        assert_eq!(decoded[&id], VolatileRecord::default());
    }

    #[test]
    fn prices_are_cents_divided_by_hundred() {
        let id = Uuid::from_u128(9);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(id.as_bytes());
        bytes.extend_from_slice(&42u32.to_le_bytes()); // rank
        bytes.extend_from_slice(&150u32.to_le_bytes()); // usd = $1.50
        for _ in 0..5 {
            bytes.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
        }

        let decoded = decode(&bytes).unwrap();
        let record = &decoded[&id];
        assert_eq!(record.edhrec_rank, Some(42));
        assert_eq!(record.usd, Some(1.50));
        assert_eq!(record.usd_foil, None);
        assert_eq!(record.tix, None);
    }

    #[test]
    fn length_mismatch_is_malformed() {
        let err = decode(&[0u8; 43]).unwrap_err();
        assert!(err.to_string().contains("malformed volatile data"));
        assert!(decode(&[0u8; RECORD_LEN + 1]).is_err());
    }

    #[test]
    fn empty_blob_decodes_to_empty_map() {
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn multiple_records_decode() {
        let a = (Uuid::from_u128(1), VolatileRecord::default());
        let b = (
            Uuid::from_u128(2),
            VolatileRecord {
                edhrec_rank: Some(1),
                usd: Some(100.0),
                ..Default::default()
            },
        );
        let mut records = HashMap::new();
        records.insert(a.0, a.1.clone());
        records.insert(b.0, b.1.clone());

        let decoded = decode(&encode(&records)).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[&a.0], a.1);
        assert_eq!(decoded[&b.0], b.1);
    }
}
