/// Device identifiers extracted from one label scan.
///
/// Every field is optional; a field is assigned at most once per scan.
/// JSON keys match the provisioning client's camel-case names, and unset
/// fields serialize as explicit `null`s rather than being omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceInfo {
    #[cfg_attr(feature = "serde", serde(rename = "productionSN"))]
    pub production_sn: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "gponSN"))]
    pub gpon_sn: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "gponSNHex"))]
    pub gpon_sn_hex: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "wanMAC"))]
    pub wan_mac: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "voipMAC"))]
    pub voip_mac: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "model"))]
    pub model: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "partNo"))]
    pub part_no: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "date"))]
    pub date: Option<String>,
}

impl DeviceInfo {
    /// Fill fields that are still unset from a secondary source.
    ///
    /// Fields already assigned by the barcode path are never overwritten.
    pub fn fill_missing_from(&mut self, other: DeviceInfo) {
        fn take(slot: &mut Option<String>, value: Option<String>) {
            if slot.is_none() {
                *slot = value;
            }
        }

        take(&mut self.production_sn, other.production_sn);
        take(&mut self.gpon_sn, other.gpon_sn);
        take(&mut self.gpon_sn_hex, other.gpon_sn_hex);
        take(&mut self.wan_mac, other.wan_mac);
        take(&mut self.voip_mac, other.voip_mac);
        take(&mut self.model, other.model);
        take(&mut self.part_no, other.part_no);
        take(&mut self.date, other.date);
    }

    pub fn is_empty(&self) -> bool {
        self.production_sn.is_none()
            && self.gpon_sn.is_none()
            && self.gpon_sn_hex.is_none()
            && self.wan_mac.is_none()
            && self.voip_mac.is_none()
            && self.model.is_none()
            && self.part_no.is_none()
            && self.date.is_none()
    }
}
