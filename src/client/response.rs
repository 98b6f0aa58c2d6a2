//! Wire format of query responses.
//!
//! ```json
//! { "data": { "result": [
//!     { "metric": { "instance": "a:9100" }, "value": [1700000000, "42.5"] },
//!     { "metric": { "instance": "b:9100" }, "values": [[1700000000, "1"], [1700000015, "2"]] }
//! ] } }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use super::FetchError;
use crate::data::{MetricSample, SamplePoint};

#[derive(Debug, Deserialize)]
struct QueryResponse {
    data: QueryData,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    #[serde(default)]
    result: Vec<RawSeries>,
}

#[derive(Debug, Deserialize)]
struct RawSeries {
    #[serde(default)]
    metric: BTreeMap<String, String>,
    #[serde(default)]
    value: Option<RawPoint>,
    #[serde(default)]
    values: Option<Vec<RawPoint>>,
}

/// `[timestamp, "value"]` as emitted by the backend.
#[derive(Debug, Deserialize)]
struct RawPoint(f64, String);

impl RawPoint {
    fn into_point(self) -> Result<SamplePoint, FetchError> {
        let value = self
            .1
            .trim()
            .parse::<f64>()
            .map_err(|_| FetchError::Parse(format!("invalid sample value {:?}", self.1)))?;
        Ok(SamplePoint::new(self.0, value))
    }
}

impl RawSeries {
    fn into_sample(self) -> Result<MetricSample, FetchError> {
        // Range results win over the instant value
        let raw_points = match (self.values, self.value) {
            (Some(values), _) => values,
            (None, Some(value)) => vec![value],
            (None, None) => Vec::new(),
        };

        let points = raw_points
            .into_iter()
            .map(RawPoint::into_point)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MetricSample::new(self.metric, points))
    }
}

/// Parse a query response body into its series.
pub fn parse_response(body: &[u8]) -> Result<Vec<MetricSample>, FetchError> {
    let response: QueryResponse = serde_json::from_slice(body)?;
    response.data.result.into_iter().map(RawSeries::into_sample).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant_result() {
        let body = br#"{"status":"success","data":{"resultType":"vector","result":[
            {"metric":{"instance":"node-1:9100"},"value":[1700000000.123,"42.1234"]}
        ]}}"#;

        let samples = parse_response(body).unwrap();

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].label("instance"), Some("node-1:9100"));
        assert_eq!(samples[0].points, vec![SamplePoint::new(1700000000.123, 42.1234)]);
    }

    #[test]
    fn test_parse_range_result() {
        let body = br#"{"data":{"result":[
            {"metric":{},"values":[[1700000000,"1.5"],[1700000015,"2.5"],[1700000030,"3"]]}
        ]}}"#;

        let samples = parse_response(body).unwrap();

        assert_eq!(samples[0].points.len(), 3);
        assert_eq!(samples[0].latest(), Some(SamplePoint::new(1700000030.0, 3.0)));
    }

    #[test]
    fn test_parse_prefers_values_over_value() {
        let body = br#"{"data":{"result":[
            {"metric":{},"value":[5,"9"],"values":[[1,"1"],[2,"2"]]}
        ]}}"#;

        let samples = parse_response(body).unwrap();
        assert_eq!(samples[0].points.len(), 2);
    }

    #[test]
    fn test_parse_missing_metric_and_points() {
        let body = br#"{"data":{"result":[{}]}}"#;

        let samples = parse_response(body).unwrap();
        assert!(samples[0].labels.is_empty());
        assert!(samples[0].points.is_empty());
    }

    #[test]
    fn test_parse_empty_result() {
        let samples = parse_response(br#"{"data":{"result":[]}}"#).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_parse_special_values() {
        let body = br#"{"data":{"result":[
            {"metric":{},"values":[[1,"NaN"],[2,"+Inf"],[3,"-Inf"]]}
        ]}}"#;

        let samples = parse_response(body).unwrap();
        let points = &samples[0].points;
        assert!(points[0].value.is_nan());
        assert_eq!(points[1].value, f64::INFINITY);
        assert_eq!(points[2].value, f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let err = parse_response(b"not json").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_missing_data() {
        let err = parse_response(br#"{"status":"error"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_non_numeric_value() {
        let body = br#"{"data":{"result":[{"metric":{},"value":[1,"abc"]}]}}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
