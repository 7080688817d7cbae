//! Data model for Areas of Interest

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;

/// Security classification of an AOI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Unclassified,
    Confidential,
    Secret,
    TopSecret,
}

impl Default for Classification {
    fn default() -> Self {
        Classification::Confidential
    }
}

/// Monitoring priority of an AOI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// How often scheduled monitoring runs for an AOI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonitoringFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for MonitoringFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitoringFrequency::Daily => write!(f, "DAILY"),
            MonitoringFrequency::Weekly => write!(f, "WEEKLY"),
            MonitoringFrequency::Monthly => write!(f, "MONTHLY"),
        }
    }
}

/// Server-reported state of the baseline image for an AOI. Informational
/// only; the client never acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// Transient status of a cached record while a lifecycle operation is in
/// flight. Local-only, never sent to or received from the server. The UI
/// disables destructive actions whenever this is not `Stable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordStatus {
    #[default]
    Stable,
    Creating,
    Created,
    Deleting,
    Analyzing,
}

/// Cache key for an AOI record.
///
/// A record inserted optimistically holds a locally generated `Pending` key
/// until the server acknowledges the create; records from the server always
/// carry `Confirmed` keys. Keeping the two tagged makes the reconciliation
/// swap type-checked instead of overloading one id field with both meanings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AoiKey {
    /// Locally generated temporary id, awaiting server confirmation
    Pending(u64),
    /// Stable server-assigned id
    Confirmed(i64),
}

impl AoiKey {
    /// Whether this key is still awaiting server confirmation
    pub fn is_pending(&self) -> bool {
        matches!(self, AoiKey::Pending(_))
    }
}

impl fmt::Display for AoiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AoiKey::Pending(n) => write!(f, "temp-{}", n),
            AoiKey::Confirmed(id) => write!(f, "{}", id),
        }
    }
}

/// Geographic bounding box, latitude/longitude order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lon_min: f64,
    pub lat_max: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    pub fn new(lat_min: f64, lon_min: f64, lat_max: f64, lon_max: f64) -> Result<Self, Error> {
        let bbox = Self {
            lat_min,
            lon_min,
            lat_max,
            lon_max,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    /// Validate the backend's coordinate rules
    pub fn validate(&self) -> Result<(), Error> {
        if !(-90.0..=90.0).contains(&self.lat_min) || !(-90.0..=90.0).contains(&self.lat_max) {
            return Err(Error::validation(
                "Latitude values must be between -90 and 90",
            ));
        }
        if !(-180.0..=180.0).contains(&self.lon_min) || !(-180.0..=180.0).contains(&self.lon_max) {
            return Err(Error::validation(
                "Longitude values must be between -180 and 180",
            ));
        }
        if self.lat_min >= self.lat_max || self.lon_min >= self.lon_max {
            return Err(Error::validation(
                "Invalid bounding box: min values must be less than max values",
            ));
        }
        Ok(())
    }
}

impl TryFrom<[f64; 4]> for BoundingBox {
    type Error = Error;

    fn try_from(coords: [f64; 4]) -> Result<Self, Error> {
        BoundingBox::new(coords[0], coords[1], coords[2], coords[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        [bbox.lat_min, bbox.lon_min, bbox.lat_max, bbox.lon_max]
    }
}

/// Form data for a new AOI
#[derive(Debug, Clone)]
pub struct AoiDraft {
    pub name: String,
    pub description: String,
    pub location_name: String,
    pub classification: Classification,
    pub priority: Priority,
    pub color_code: String,
    pub bbox: BoundingBox,
}

impl AoiDraft {
    /// Reject invalid drafts before any side effect
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("AOI name is required"));
        }
        self.bbox.validate()
    }
}

/// A cached AOI record, the unit of the entity cache
#[derive(Debug, Clone)]
pub struct AoiRecord {
    pub key: AoiKey,
    pub name: String,
    pub description: String,
    pub location_name: String,
    pub classification: Classification,
    pub priority: Priority,
    pub color_code: String,
    pub bbox: BoundingBox,
    pub monitoring_frequency: Option<MonitoringFrequency>,
    pub baseline_status: Option<BaselineStatus>,
    pub status: RecordStatus,
}

impl AoiRecord {
    /// Build the optimistic record inserted when a create is issued
    pub fn pending(temp: u64, draft: &AoiDraft, frequency: MonitoringFrequency) -> Self {
        Self {
            key: AoiKey::Pending(temp),
            name: draft.name.clone(),
            description: draft.description.clone(),
            location_name: draft.location_name.clone(),
            classification: draft.classification,
            priority: draft.priority,
            color_code: draft.color_code.clone(),
            bbox: draft.bbox,
            monitoring_frequency: Some(frequency),
            baseline_status: None,
            status: RecordStatus::Creating,
        }
    }
}

/// AOI as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AoiDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    pub bbox_coordinates: BoundingBox,
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub color_code: Option<String>,
    #[serde(default)]
    pub monitoring_frequency: Option<MonitoringFrequency>,
    #[serde(default)]
    pub baseline_status: Option<BaselineStatus>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl From<AoiDto> for AoiRecord {
    fn from(dto: AoiDto) -> Self {
        Self {
            key: AoiKey::Confirmed(dto.id),
            name: dto.name,
            description: dto.description.unwrap_or_default(),
            location_name: dto.location_name.unwrap_or_default(),
            classification: dto.classification,
            priority: dto.priority,
            color_code: dto.color_code.unwrap_or_else(|| "#3B82F6".to_string()),
            bbox: dto.bbox_coordinates,
            monitoring_frequency: dto.monitoring_frequency,
            baseline_status: dto.baseline_status,
            status: RecordStatus::Stable,
        }
    }
}

/// Standard response envelope the backend wraps every payload in
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the data payload. Fails when the envelope reports failure,
    /// even on an HTTP success status, or when the payload is missing.
    pub fn into_data(self) -> Result<T, Error> {
        if !self.success {
            return Err(Error::api(
                200,
                self.message
                    .unwrap_or_else(|| "request reported failure".into()),
            ));
        }
        self.data
            .ok_or_else(|| Error::api(200, self.message.unwrap_or_else(|| "empty response".into())))
    }
}

/// Payload of the AOI list endpoint
#[derive(Debug, Deserialize)]
pub struct AoiListData {
    pub areas_of_interest: Vec<AoiDto>,
    #[serde(default)]
    pub total_count: usize,
}

/// Create request body
#[derive(Debug, Serialize)]
pub struct CreateAoiRequest {
    pub name: String,
    pub description: String,
    pub location_name: String,
    pub bbox_coordinates: BoundingBox,
    pub classification: Classification,
    pub priority: Priority,
    pub color_code: String,
    pub monitoring_frequency: MonitoringFrequency,
}

impl CreateAoiRequest {
    pub fn from_draft(draft: &AoiDraft, frequency: MonitoringFrequency) -> Self {
        Self {
            name: draft.name.clone(),
            description: draft.description.clone(),
            location_name: draft.location_name.clone(),
            bbox_coordinates: draft.bbox,
            classification: draft.classification,
            priority: draft.priority,
            color_code: draft.color_code.clone(),
            monitoring_frequency: frequency,
        }
    }
}

/// Server acknowledgment of a create. Baseline generation continues in the
/// background after this returns.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAck {
    pub aoi_id: i64,
    pub baseline_status: BaselineStatus,
    #[serde(default)]
    pub tokens_remaining: Option<i64>,
}

/// Kind of analysis to run against an AOI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    BaselineComparison,
    TimeRange,
}

impl Default for AnalysisType {
    fn default() -> Self {
        AnalysisType::BaselineComparison
    }
}

/// Analysis request body
#[derive(Debug, Serialize)]
pub struct RunAnalysisRequest {
    pub analysis_type: AnalysisType,
}

/// Token accounting attached to an analysis result
#[derive(Debug, Clone, Deserialize)]
pub struct TokenUsage {
    pub tokens_remaining: i64,
    #[serde(default)]
    pub tokens_used_this_session: i64,
}

/// Image URLs produced by an analysis
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisImages {
    pub baseline_url: Option<String>,
    pub current_url: Option<String>,
    pub heatmap_url: Option<String>,
}

/// Result payload of a completed analysis
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisReport {
    #[serde(default)]
    pub analysis_id: Option<i64>,
    pub process_id: String,
    pub change_percentage: f64,
    #[serde(default)]
    pub user_tokens: Option<TokenUsage>,
    #[serde(default)]
    pub images: Option<AnalysisImages>,
}

/// Schedule request body
#[derive(Debug, Serialize)]
pub struct ScheduleRequest {
    pub frequency: MonitoringFrequency,
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_accepts_valid_coordinates() {
        let bbox = BoundingBox::new(10.0, 10.0, 20.0, 20.0).unwrap();
        assert_eq!(bbox.lat_max, 20.0);
    }

    #[test]
    fn bbox_rejects_out_of_range_latitude() {
        assert!(BoundingBox::new(-91.0, 0.0, 10.0, 10.0).is_err());
        assert!(BoundingBox::new(0.0, 0.0, 95.0, 10.0).is_err());
    }

    #[test]
    fn bbox_rejects_out_of_range_longitude() {
        assert!(BoundingBox::new(0.0, -181.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn bbox_rejects_inverted_bounds() {
        assert!(BoundingBox::new(20.0, 10.0, 10.0, 20.0).is_err());
        assert!(BoundingBox::new(10.0, 20.0, 20.0, 10.0).is_err());
    }

    #[test]
    fn bbox_round_trips_as_four_floats() {
        let bbox = BoundingBox::new(10.0, 11.0, 20.0, 21.0).unwrap();
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[10.0,11.0,20.0,21.0]");
        let back: BoundingBox = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bbox);
    }

    #[test]
    fn bbox_deserialization_enforces_validation() {
        let result: Result<BoundingBox, _> = serde_json::from_str("[20.0,10.0,10.0,20.0]");
        assert!(result.is_err());
    }

    #[test]
    fn draft_requires_a_name() {
        let draft = AoiDraft {
            name: "  ".to_string(),
            description: String::new(),
            location_name: String::new(),
            classification: Classification::default(),
            priority: Priority::default(),
            color_code: "#3B82F6".to_string(),
            bbox: BoundingBox::new(10.0, 10.0, 20.0, 20.0).unwrap(),
        };
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn dto_converts_to_stable_record() {
        let dto: AoiDto = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "Site A",
            "bbox_coordinates": [10.0, 10.0, 20.0, 20.0],
            "classification": "SECRET",
            "priority": "HIGH",
            "baseline_status": "completed"
        }))
        .unwrap();

        let record = AoiRecord::from(dto);
        assert_eq!(record.key, AoiKey::Confirmed(42));
        assert_eq!(record.status, RecordStatus::Stable);
        assert_eq!(record.classification, Classification::Secret);
        assert_eq!(record.baseline_status, Some(BaselineStatus::Completed));
        assert_eq!(record.color_code, "#3B82F6");
    }

    #[test]
    fn envelope_failure_is_an_error_even_with_data_present() {
        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_value(serde_json::json!({
            "success": false,
            "message": "token expired",
            "data": { "areas_of_interest": [] }
        }))
        .unwrap();

        match envelope.into_data() {
            Err(Error::Api { message, .. }) => assert!(message.contains("token expired")),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn envelope_success_yields_the_payload() {
        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_value(serde_json::json!({
            "success": true,
            "message": "ok",
            "data": { "total_count": 0 }
        }))
        .unwrap();

        assert!(envelope.into_data().is_ok());
    }

    #[test]
    fn pending_keys_display_with_temp_prefix() {
        assert_eq!(AoiKey::Pending(7).to_string(), "temp-7");
        assert_eq!(AoiKey::Confirmed(42).to_string(), "42");
    }

    #[test]
    fn analysis_type_serializes_snake_case() {
        let body = RunAnalysisRequest {
            analysis_type: AnalysisType::BaselineComparison,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"analysis_type":"baseline_comparison"}"#
        );
    }
}
