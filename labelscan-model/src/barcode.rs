use std::fmt;

/// Semantic category assigned to a decoded barcode payload.
///
/// The wire names (`MAC`, `GPON S/N`, `S/N`, `Unknown`) are what the
/// provisioning client matches on; keep them stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarcodeKind {
    #[cfg_attr(feature = "serde", serde(rename = "MAC"))]
    Mac,
    #[cfg_attr(feature = "serde", serde(rename = "GPON S/N"))]
    GponSerial,
    #[cfg_attr(feature = "serde", serde(rename = "S/N"))]
    Serial,
    #[cfg_attr(feature = "serde", serde(rename = "Unknown"))]
    Unknown,
}

impl BarcodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeKind::Mac => "MAC",
            BarcodeKind::GponSerial => "GPON S/N",
            BarcodeKind::Serial => "S/N",
            BarcodeKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BarcodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detection as reported by the decoder for a single image variant.
///
/// Not unique: the same physical barcode is usually reported several times
/// across variants and collapses during aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDetection {
    pub payload: String,
    pub symbology: String,
}

/// A classified, normalized barcode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifiedBarcode {
    pub data: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: BarcodeKind,
    #[cfg_attr(feature = "serde", serde(rename = "format"))]
    pub symbology: String,
}

impl ClassifiedBarcode {
    pub fn new(
        data: impl Into<String>,
        kind: BarcodeKind,
        symbology: impl Into<String>,
    ) -> Self {
        Self {
            data: data.into(),
            kind,
            symbology: symbology.into(),
        }
    }
}
