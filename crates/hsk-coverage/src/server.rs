//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the statistics builders over MCP on stdio so assistants can ask
//! coverage questions about a vocabulary passed inline.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It wraps the same core library that
//! the CLI commands use; each `#[tool]` method delegates to core library
//! functions and serializes the result as JSON text.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use hsk_coverage_core::config::Config;
use hsk_coverage_core::{ExportMode, MAX_RANK_BOUND, TrackedSet, Word, coverage, export, stats};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `frequency_stats` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct FrequencyStatsParams {
    /// Word list: `{"id", "hskLevel", "frequency"}` records.
    pub words: Vec<Word>,
    /// Identifiers of the tracked words.
    #[serde(default)]
    pub tracked: Vec<String>,
    /// HSK level filter; 7 switches to the extended tier.
    pub level_filter: Option<u8>,
    /// Rank cutoff for the top-N coverage figure.
    pub top_n: Option<u32>,
}

/// Parameters for the `coverage_curve` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CoverageCurveParams {
    /// Word list: `{"id", "hskLevel", "frequency"}` records.
    pub words: Vec<Word>,
    /// Identifiers of the tracked words.
    #[serde(default)]
    pub tracked: Vec<String>,
    /// Highest rank considered by the curve, at most 1000000.
    pub rank_bound: Option<u32>,
}

/// Parameters for the `plan_export` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct PlanExportParams {
    /// Word list, with optional `pinyin` and `meaning` fields.
    pub words: Vec<Word>,
    /// Identifiers of the tracked words.
    pub tracked: Vec<String>,
    /// Force "beginner" or "advanced" instead of choosing by deck size.
    pub mode: Option<ExportMode>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

/// MCP server exposing the coverage statistics to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    config: Config,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a new MCP server instance with default tunables.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a server whose defaults come from `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config,
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Bucket statistics over frequency ranks.
    #[tool(
        description = "Count HSK words and tracked words per frequency-rank bucket, plus top-N coverage. Pass level_filter 7 for the extended tier."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", words = params.words.len()))]
    fn frequency_stats(
        &self,
        Parameters(params): Parameters<FrequencyStatsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "frequency_stats", level_filter = ?params.level_filter, "executing MCP tool");

        let tracked: TrackedSet = params.tracked.into_iter().collect();
        let mut options = self.config.stats_options();
        if let Some(top_n) = params.top_n {
            options.top_n = top_n;
        }

        let report = stats::compute_frequency_stats_with(
            &params.words,
            &tracked,
            params.level_filter,
            &options,
        );

        tracing::info!(
            tool = "frequency_stats",
            coverage_percent = report.coverage_percent,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&report)?)]))
    }

    /// Zipf coverage curve for HSK and tracked vocabularies.
    #[tool(
        description = "Estimate running-text coverage (Zipf's law) of the ideal vocabulary, HSK 1-6, all HSK levels, and the tracked words at sampled rank thresholds."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", words = params.words.len()))]
    fn coverage_curve(
        &self,
        Parameters(params): Parameters<CoverageCurveParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "coverage_curve", rank_bound = ?params.rank_bound, "executing MCP tool");

        if let Some(bound) = params.rank_bound
            && !(1..=MAX_RANK_BOUND).contains(&bound)
        {
            return Err(McpError::invalid_params(
                format!("rank_bound must be between 1 and {MAX_RANK_BOUND}, got {bound}"),
                None,
            ));
        }

        let tracked: TrackedSet = params.tracked.into_iter().collect();
        let mut options = self.config.coverage_options();
        if let Some(bound) = params.rank_bound {
            options.rank_bound = bound;
        }

        let curve = coverage::compute_coverage_curve_with(&params.words, &tracked, &options);

        tracing::info!(
            tool = "coverage_curve",
            tracked_final = curve.tracked_final_percent,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&curve)?)]))
    }

    /// Plan a flashcard deck.
    #[tool(
        description = "Plan an Anki deck from the tracked HSK 1-6 words: note model, card templates, and a stable GUID per note."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", words = params.words.len()))]
    fn plan_export(
        &self,
        Parameters(params): Parameters<PlanExportParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "plan_export", mode = ?params.mode, "executing MCP tool");

        let tracked: TrackedSet = params.tracked.into_iter().collect();
        let plan = export::plan_export(
            &params.words,
            &tracked,
            params.mode,
            self.config.beginner_threshold(),
        )
        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        tracing::info!(
            tool = "plan_export",
            mode = %plan.mode,
            notes = plan.word_count,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&plan)?)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Pass a word list and tracked ids to compute HSK frequency statistics, coverage curves, and export plans.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
