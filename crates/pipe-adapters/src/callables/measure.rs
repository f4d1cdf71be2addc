//! MeasureRegions (sink stub).
//!
//! Resume una lista de regiones en métricas agregadas, filtrando por área
//! mínima. Valores deterministas: conteo, área total y área media.

use pipe_core::{CallError, Callable, Outputs, ParamSpec, ResolvedParams};
use serde_json::json;

pub struct MeasureRegions;

impl Callable for MeasureRegions {
    fn name(&self) -> &str {
        "measure_regions"
    }

    fn signature(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::required("regions"), ParamSpec::with_default("min_area", json!(1.0))]
    }

    fn call(&self, params: &ResolvedParams) -> Result<Outputs, CallError> {
        let regions = params.require("regions")?
                            .as_array()
                            .ok_or("parameter 'regions' is not a list")?;
        let min_area = params.as_f64("min_area")?;

        let areas: Vec<f64> = regions.iter()
                                     .filter_map(|r| r.get("area").and_then(|a| a.as_f64()))
                                     .filter(|a| *a >= min_area)
                                     .collect();
        let total: f64 = areas.iter().sum();
        let mean = if areas.is_empty() { 0.0 } else { total / areas.len() as f64 };
        Ok(Outputs::single(json!({
            "count": areas.len(),
            "total_area": total,
            "mean_area": mean,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_and_filters_by_min_area() {
        let regions = json!([{"area": 50.0}, {"area": 100.0}, {"area": 150.0}]);
        let params = ResolvedParams::from_pairs(vec![("regions".to_string(), regions),
                                                     ("min_area".to_string(), json!(60.0))]);
        let out = MeasureRegions.call(&params).expect("stub measure");
        assert_eq!(out.values()[0]["count"], json!(2));
        assert_eq!(out.values()[0]["total_area"], json!(250.0));
        assert_eq!(out.values()[0]["mean_area"], json!(125.0));
    }

    #[test]
    fn empty_region_list_yields_zeroes() {
        let params = ResolvedParams::from_pairs(vec![("regions".to_string(), json!([])),
                                                     ("min_area".to_string(), json!(1.0))]);
        let out = MeasureRegions.call(&params).expect("stub measure");
        assert_eq!(out.values()[0]["count"], json!(0));
        assert_eq!(out.values()[0]["mean_area"], json!(0.0));
    }
}
