//! Project X revenue model tools
//!
//! The workbook is the source of truth for the revenue math; these tools
//! only move values in and out of its named cells.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use crate::llm::core::types::ToolSchema;
use crate::llm::tools::registry::{RegistryError, ToolRegistry};
use crate::llm::tools::schema::ParamType;

use super::client::{CellUpdate, GridClient, QueryRequest};

/// Workbook holding the Project X revenue model
const WORKBOOK_ID: &str = "project-x-revenue";

/// Named assumption cells exposed by `get_model_defaults`
const ASSUMPTION_CELLS: [&str; 5] = [
    "forecast_months",
    "initial_customers",
    "monthly_growth_rate",
    "monthly_churn_rate",
    "average_revenue_per_user",
];

/// Named projection cells read back by `forecast_revenue`
const PROJECTION_CELLS: [&str; 2] = ["projected_revenue", "projected_customers"];

/// Arguments for `get_model_defaults` (none)
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetModelDefaultsArgs {}

/// Arguments for `forecast_revenue`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastRevenueArgs {
    pub months: u32,
    pub monthly_growth_rate: f64,
    pub monthly_churn_rate: f64,
    pub average_revenue_per_user: f64,
}

/// The Project X revenue workbook, exposed to the model as two tools
pub struct ProjectXRevenueModel {
    grid: Arc<GridClient>,
}

impl ProjectXRevenueModel {
    pub fn new(grid: Arc<GridClient>) -> Self {
        Self { grid }
    }

    /// Read the workbook's current default assumptions
    pub async fn get_model_defaults(&self) -> Result<serde_json::Value, String> {
        let request =
            QueryRequest::read_only(ASSUMPTION_CELLS.iter().map(|s| s.to_string()).collect());

        let response = self
            .grid
            .query(WORKBOOK_ID, &request)
            .await
            .map_err(|e| e.to_string())?;

        Ok(response.into_map())
    }

    /// Write new assumptions into the workbook and read the projections back
    pub async fn forecast_revenue(
        &self,
        args: ForecastRevenueArgs,
    ) -> Result<serde_json::Value, String> {
        let apply = vec![
            CellUpdate::new("forecast_months", json!(args.months)),
            CellUpdate::new("monthly_growth_rate", json!(args.monthly_growth_rate)),
            CellUpdate::new("monthly_churn_rate", json!(args.monthly_churn_rate)),
            CellUpdate::new(
                "average_revenue_per_user",
                json!(args.average_revenue_per_user),
            ),
        ];
        let request = QueryRequest::new(
            apply,
            PROJECTION_CELLS.iter().map(|s| s.to_string()).collect(),
        );

        let response = self
            .grid
            .query(WORKBOOK_ID, &request)
            .await
            .map_err(|e| e.to_string())?;

        Ok(response.into_map())
    }

    /// Register both workbook tools
    ///
    /// Compiles the schemas and installs the bindings; called once at
    /// startup, errors abort the process.
    pub fn register(self, registry: &mut ToolRegistry) -> Result<(), RegistryError> {
        let model = Arc::new(self);

        let defaults_model = Arc::clone(&model);
        registry.register_async(
            ToolSchema::builder("get_model_defaults")
                .description(
                    "Read the revenue model's default assumptions: forecast horizon, \
                     starting customer count, monthly growth and churn rates, and \
                     average revenue per user.",
                )
                .build(),
            move |_args: GetModelDefaultsArgs| {
                let model = Arc::clone(&defaults_model);
                async move { model.get_model_defaults().await }
            },
        )?;

        let forecast_model = model;
        registry.register_async(
            ToolSchema::builder("forecast_revenue")
                .description(
                    "Forecast Project X revenue: writes the given assumptions into \
                     the model and returns the projected revenue and customer count \
                     over the forecast horizon.",
                )
                .param("months", ParamType::Integer)
                .param("monthly_growth_rate", ParamType::Number)
                .param("monthly_churn_rate", ParamType::Number)
                .param("average_revenue_per_user", ParamType::Number)
                .build(),
            move |args: ForecastRevenueArgs| {
                let model = Arc::clone(&forecast_model);
                async move { model.forecast_revenue(args).await }
            },
        )?;

        Ok(())
    }
}
