//! The dashboard controller.
//!
//! Owns the loaded player records and the current position filter, derives
//! six chart datasets, and hands each to a [`ChartRenderer`] as a
//! declarative [`ChartConfig`] targeting a fixed render surface:
//!
//! - Four top-5 leaderboards (win rate, KDA, kill participation, DPM)
//!   over the filtered player set
//! - Position distribution and average KDA per position, always over the
//!   full set
//!
//! The record set is immutable after load; the filter is the only mutable
//! state. `set_filter` is a pure state update; re-rendering is an
//! explicit, idempotent `render_all` call.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::calculate;
use crate::fetch::PlayerClient;
use crate::models::{Axis, ChartConfig, ChartKind, Metric, NamedPoint, PlayerRecord, Series};

/// Render surface ids, as named in the host page markup.
pub const WIN_RATE_SURFACE: &str = "winrateChart";
pub const KDA_SURFACE: &str = "kdaChart";
pub const KP_SURFACE: &str = "kpChart";
pub const DPM_SURFACE: &str = "dpmChart";
pub const POSITION_SURFACE: &str = "positionChart";
pub const POSITION_KDA_SURFACE: &str = "positionKDAChart";

/// Filter value meaning "no position filter".
pub const ALL_POSITIONS: &str = "all";

const LEADERBOARD_SIZE: usize = 5;

/// Errors raised by a chart renderer.
///
/// These are collaborator faults and propagate out of `render_all`; the
/// controller makes no attempt to recover from them.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The charting collaborator: receives one configuration per draw call,
/// targeting a named render surface.
pub trait ChartRenderer {
    fn draw(&mut self, surface: &str, config: &ChartConfig) -> Result<(), RenderError>;
}

/// Writes each chart configuration to `<out_dir>/<surface>.json` for a
/// host page to pick up.
pub struct JsonDirRenderer {
    out_dir: PathBuf,
}

impl JsonDirRenderer {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

impl ChartRenderer for JsonDirRenderer {
    fn draw(&mut self, surface: &str, config: &ChartConfig) -> Result<(), RenderError> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(format!("{}.json", surface));
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&path, json)?;
        info!("Wrote {:?}", path);
        Ok(())
    }
}

/// Loads player records once and re-renders all six charts on demand.
pub struct DashboardController<R: ChartRenderer> {
    players: Vec<PlayerRecord>,
    current_filter: String,
    renderer: R,
}

impl<R: ChartRenderer> DashboardController<R> {
    /// Create a controller with an empty dataset and the "all" filter.
    pub fn new(renderer: R) -> Self {
        Self {
            players: Vec::new(),
            current_filter: ALL_POSITIONS.to_string(),
            renderer,
        }
    }

    /// Create a controller over an already-loaded dataset.
    pub fn with_players(players: Vec<PlayerRecord>, renderer: R) -> Self {
        Self {
            players,
            current_filter: ALL_POSITIONS.to_string(),
            renderer,
        }
    }

    /// Load player records, then render all six charts.
    ///
    /// A failed load is logged and swallowed: the dataset stays empty and
    /// every chart renders with empty series. Render failures propagate.
    pub async fn initialize(&mut self, client: &PlayerClient) -> Result<(), RenderError> {
        self.load_players(client).await;
        self.render_all()
    }

    /// Fetch the record set from the stats API.
    ///
    /// On any failure (network, non-2xx, malformed JSON) the current
    /// dataset is left untouched. Records failing validation are dropped.
    pub async fn load_players(&mut self, client: &PlayerClient) {
        match client.fetch_players().await {
            Ok(records) => {
                self.players = crate::models::retain_valid(records);
                info!("Loaded {} players", self.players.len());
            }
            Err(e) => {
                error!("Error loading player data: {}", e);
            }
        }
    }

    /// Set the position filter. Does not re-render; callers follow up
    /// with an explicit `render_all`.
    pub fn set_filter(&mut self, value: impl Into<String>) {
        self.current_filter = value.into();
    }

    pub fn current_filter(&self) -> &str {
        &self.current_filter
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    /// The players matching the current filter, in original load order.
    /// A fresh sequence on every call; `"all"` selects everything.
    pub fn filtered_players(&self) -> Vec<&PlayerRecord> {
        snapshot_filtered(&self.players, &self.current_filter)
    }

    /// Render all six charts. Each chart derives its own dataset; the
    /// calls are independent and run in a fixed but arbitrary order.
    pub fn render_all(&mut self) -> Result<(), RenderError> {
        let filtered = snapshot_filtered(&self.players, &self.current_filter);

        let win_rate = win_rate_chart(&filtered);
        let kda = kda_chart(&filtered);
        let kp = kill_participation_chart(&filtered);
        let dpm = damage_per_minute_chart(&filtered);
        let distribution = position_distribution_chart(&self.players);
        let average_kda = average_kda_chart(&self.players);

        self.renderer.draw(WIN_RATE_SURFACE, &win_rate)?;
        self.renderer.draw(KDA_SURFACE, &kda)?;
        self.renderer.draw(KP_SURFACE, &kp)?;
        self.renderer.draw(DPM_SURFACE, &dpm)?;
        self.renderer.draw(POSITION_SURFACE, &distribution)?;
        self.renderer.draw(POSITION_KDA_SURFACE, &average_kda)?;
        Ok(())
    }
}

fn snapshot_filtered<'a>(players: &'a [PlayerRecord], filter: &str) -> Vec<&'a PlayerRecord> {
    if filter == ALL_POSITIONS {
        players.iter().collect()
    } else {
        calculate::filter_by_position(players, filter)
    }
}

fn leaderboard_names(top: &[&PlayerRecord]) -> Vec<String> {
    top.iter().map(|p| p.player_name.clone()).collect()
}

/// Top-5 win rate bar chart; values scaled from fraction to percent.
pub fn win_rate_chart(filtered: &[&PlayerRecord]) -> ChartConfig {
    let top = calculate::leaderboard(filtered, Metric::WinRate, LEADERBOARD_SIZE);
    let data: Vec<f64> = top.iter().map(|p| p.win_rate * 100.0).collect();

    ChartConfig::new(ChartKind::Bar)
        .x_axis(Axis::with_categories(leaderboard_names(&top)))
        .y_axis(
            Axis::with_title("Win rate (%)")
                .min(0.0)
                .label_format("{value}%"),
        )
        .tooltip("{point.y:.1f}%")
        .series(Series::values("Win Rate", data, "#28a745"))
}

/// Top-5 KDA column chart.
pub fn kda_chart(filtered: &[&PlayerRecord]) -> ChartConfig {
    let top = calculate::leaderboard(filtered, Metric::Kda, LEADERBOARD_SIZE);
    let data: Vec<f64> = top.iter().map(|p| p.kda).collect();

    ChartConfig::new(ChartKind::Column)
        .x_axis(Axis::with_categories(leaderboard_names(&top)))
        .y_axis(Axis::with_title("KDA Ratio"))
        .tooltip("KDA: <b>{point.y:.2f}</b>")
        .series(Series::values("KDA", data, "#007bff"))
}

/// Top-5 kill participation bar chart.
pub fn kill_participation_chart(filtered: &[&PlayerRecord]) -> ChartConfig {
    let top = calculate::leaderboard(filtered, Metric::KillParticipation, LEADERBOARD_SIZE);
    let data: Vec<f64> = top.iter().map(|p| p.kill_participation).collect();

    ChartConfig::new(ChartKind::Bar)
        .x_axis(Axis::with_categories(leaderboard_names(&top)))
        .y_axis(
            Axis::with_title("Kill participation (%)")
                .min(0.0)
                .label_format("{value}%"),
        )
        .tooltip("{point.y:.1f}%")
        .series(Series::values("KP%", data, "#ffc107"))
}

/// Top-5 damage-per-minute column chart.
pub fn damage_per_minute_chart(filtered: &[&PlayerRecord]) -> ChartConfig {
    let top = calculate::leaderboard(filtered, Metric::DamagePerMinute, LEADERBOARD_SIZE);
    let data: Vec<f64> = top.iter().map(|p| p.damage_per_minute).collect();

    ChartConfig::new(ChartKind::Column)
        .x_axis(Axis::with_categories(leaderboard_names(&top)))
        .y_axis(Axis::with_title("Damage per minute"))
        .tooltip("DPM: <b>{point.y}</b>")
        .series(Series::values("DPM", data, "#dc3545"))
}

/// Player count per position as a pie chart. Always the full dataset.
pub fn position_distribution_chart(players: &[PlayerRecord]) -> ChartConfig {
    let points: Vec<NamedPoint> = calculate::position_counts(players)
        .into_iter()
        .map(|(name, count)| NamedPoint {
            name,
            y: count as f64,
        })
        .collect();

    ChartConfig::new(ChartKind::Pie)
        .title("Player distribution by position")
        .tooltip("{series.name}: <b>{point.percentage:.1f}%</b>")
        .series(Series::points("Players", points))
}

/// Average KDA per position as a line chart. Always the full dataset.
pub fn average_kda_chart(players: &[PlayerRecord]) -> ChartConfig {
    let averages = calculate::average_kda_by_position(players);
    let categories: Vec<String> = averages.iter().map(|(name, _)| name.clone()).collect();
    let data: Vec<f64> = averages.iter().map(|(_, avg)| *avg).collect();

    ChartConfig::new(ChartKind::Line)
        .title("Average KDA by position")
        .x_axis(Axis::with_categories(categories).title("Position"))
        .y_axis(Axis::with_title("Average KDA"))
        .tooltip("Average KDA: <b>{point.y:.2f}</b>")
        .series(Series::values("Average KDA", data, "#6f42c1"))
}

/// All six chart configurations for one filter value, keyed by render
/// surface, plus the filter and computation time.
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub position_filter: String,

    pub computed_at: DateTime<Utc>,

    #[serde(rename = "winrateChart")]
    pub win_rate: ChartConfig,

    #[serde(rename = "kdaChart")]
    pub kda: ChartConfig,

    #[serde(rename = "kpChart")]
    pub kill_participation: ChartConfig,

    #[serde(rename = "dpmChart")]
    pub damage_per_minute: ChartConfig,

    #[serde(rename = "positionChart")]
    pub position_distribution: ChartConfig,

    #[serde(rename = "positionKDAChart")]
    pub average_kda: ChartConfig,
}

/// Build the full dashboard for a dataset and filter value.
pub fn build_snapshot(players: &[PlayerRecord], filter: &str) -> DashboardSnapshot {
    let filtered = snapshot_filtered(players, filter);

    DashboardSnapshot {
        position_filter: filter.to_string(),
        computed_at: Utc::now(),
        win_rate: win_rate_chart(&filtered),
        kda: kda_chart(&filtered),
        kill_participation: kill_participation_chart(&filtered),
        damage_per_minute: damage_per_minute_chart(&filtered),
        position_distribution: position_distribution_chart(players),
        average_kda: average_kda_chart(players),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeriesData;

    /// Captures draw calls instead of rendering.
    #[derive(Default)]
    struct CapturingRenderer {
        draws: Vec<(String, ChartConfig)>,
    }

    impl ChartRenderer for CapturingRenderer {
        fn draw(&mut self, surface: &str, config: &ChartConfig) -> Result<(), RenderError> {
            self.draws.push((surface.to_string(), config.clone()));
            Ok(())
        }
    }

    /// Fails every draw call.
    struct FailingRenderer;

    impl ChartRenderer for FailingRenderer {
        fn draw(&mut self, _surface: &str, _config: &ChartConfig) -> Result<(), RenderError> {
            Err(RenderError::Backend("surface missing".to_string()))
        }
    }

    fn player(name: &str, position: &str, wr: f64, kda: f64, kp: f64, dpm: f64) -> PlayerRecord {
        PlayerRecord {
            player_name: name.to_string(),
            team_name: None,
            position: position.to_string(),
            win_rate: wr,
            kda,
            kill_participation: kp,
            damage_per_minute: dpm,
            gold_per_minute: None,
        }
    }

    fn sample_players() -> Vec<PlayerRecord> {
        vec![
            player("A", "mid", 0.6, 4.0, 60.0, 500.0),
            player("B", "mid", 0.6, 3.0, 50.0, 400.0),
            player("C", "top", 0.9, 5.0, 70.0, 600.0),
        ]
    }

    fn categories(config: &ChartConfig) -> Vec<String> {
        config.x_axis.as_ref().unwrap().categories.clone()
    }

    fn values(config: &ChartConfig) -> Vec<f64> {
        match &config.series[0].data {
            SeriesData::Values(v) => v.clone(),
            SeriesData::Points(_) => panic!("expected plain values"),
        }
    }

    #[test]
    fn test_filtered_players_all_returns_everything() {
        let controller =
            DashboardController::with_players(sample_players(), CapturingRenderer::default());

        let filtered = controller.filtered_players();
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered[0].player_name, "A");
        assert_eq!(filtered[2].player_name, "C");
    }

    #[test]
    fn test_filtered_players_by_position() {
        let mut controller =
            DashboardController::with_players(sample_players(), CapturingRenderer::default());
        controller.set_filter("mid");

        let filtered = controller.filtered_players();
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|p| p.position == "mid"));
    }

    #[test]
    fn test_filtered_players_unknown_filter_is_empty() {
        let mut controller =
            DashboardController::with_players(sample_players(), CapturingRenderer::default());
        controller.set_filter("coach");
        assert!(controller.filtered_players().is_empty());
    }

    #[test]
    fn test_win_rate_chart_order_and_scaling() {
        let players = sample_players();
        let refs: Vec<&PlayerRecord> = players.iter().collect();

        let config = win_rate_chart(&refs);
        assert_eq!(config.chart.kind, ChartKind::Bar);
        assert_eq!(categories(&config), vec!["C", "A", "B"]);
        assert_eq!(values(&config), vec![90.0, 60.0, 60.0]);
    }

    #[test]
    fn test_kda_chart_order() {
        let players = sample_players();
        let refs: Vec<&PlayerRecord> = players.iter().collect();

        let config = kda_chart(&refs);
        assert_eq!(config.chart.kind, ChartKind::Column);
        assert_eq!(categories(&config), vec!["C", "A", "B"]);
        assert_eq!(values(&config), vec![5.0, 4.0, 3.0]);
    }

    #[test]
    fn test_leaderboards_cap_at_five() {
        let players: Vec<PlayerRecord> = (0..7)
            .map(|i| {
                player(
                    &format!("P{}", i),
                    "mid",
                    0.5,
                    i as f64,
                    50.0,
                    100.0 * i as f64,
                )
            })
            .collect();
        let refs: Vec<&PlayerRecord> = players.iter().collect();

        assert_eq!(values(&kda_chart(&refs)).len(), 5);
        assert_eq!(values(&damage_per_minute_chart(&refs)).len(), 5);
    }

    #[test]
    fn test_position_distribution_counts() {
        let config = position_distribution_chart(&sample_players());
        assert_eq!(config.chart.kind, ChartKind::Pie);

        match &config.series[0].data {
            SeriesData::Points(points) => {
                assert_eq!(points.len(), 2);
                assert_eq!(points[0].name, "mid");
                assert_eq!(points[0].y, 2.0);
                assert_eq!(points[1].name, "top");
                assert_eq!(points[1].y, 1.0);
            }
            SeriesData::Values(_) => panic!("expected named points"),
        }
    }

    #[test]
    fn test_average_kda_chart_means() {
        let config = average_kda_chart(&sample_players());
        assert_eq!(config.chart.kind, ChartKind::Line);
        assert_eq!(categories(&config), vec!["mid", "top"]);

        let data = values(&config);
        assert!((data[0] - 3.5).abs() < 1e-9);
        assert!((data[1] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_render_all_draws_six_surfaces() {
        let mut controller =
            DashboardController::with_players(sample_players(), CapturingRenderer::default());

        controller.render_all().unwrap();

        let surfaces: Vec<&str> = controller
            .renderer
            .draws
            .iter()
            .map(|(s, _)| s.as_str())
            .collect();
        assert_eq!(
            surfaces,
            vec![
                WIN_RATE_SURFACE,
                KDA_SURFACE,
                KP_SURFACE,
                DPM_SURFACE,
                POSITION_SURFACE,
                POSITION_KDA_SURFACE,
            ]
        );
    }

    #[test]
    fn test_render_all_filter_spares_distribution_charts() {
        let mut controller =
            DashboardController::with_players(sample_players(), CapturingRenderer::default());
        controller.set_filter("top");
        controller.render_all().unwrap();

        let draws = &controller.renderer.draws;

        // Leaderboards see only C.
        let (_, win_rate) = &draws[0];
        assert_eq!(categories(win_rate), vec!["C"]);

        // Distribution charts still cover the full dataset.
        let (_, distribution) = &draws[4];
        assert_eq!(distribution.series[0].data.len(), 2);
        let (_, average) = &draws[5];
        assert_eq!(categories(average), vec!["mid", "top"]);
    }

    #[test]
    fn test_render_all_empty_dataset_renders_empty_series() {
        let mut controller = DashboardController::new(CapturingRenderer::default());
        controller.render_all().unwrap();

        assert_eq!(controller.renderer.draws.len(), 6);
        for (_, config) in &controller.renderer.draws {
            assert!(config.series[0].data.is_empty());
        }
    }

    #[test]
    fn test_render_failure_propagates() {
        let mut controller = DashboardController::with_players(sample_players(), FailingRenderer);
        assert!(controller.render_all().is_err());
    }

    #[test]
    fn test_set_filter_does_not_render() {
        let mut controller =
            DashboardController::with_players(sample_players(), CapturingRenderer::default());
        controller.set_filter("mid");
        assert_eq!(controller.current_filter(), "mid");
        assert!(controller.renderer.draws.is_empty());
    }

    #[test]
    fn test_snapshot_has_all_six_surfaces() {
        let snapshot = build_snapshot(&sample_players(), ALL_POSITIONS);
        let json = serde_json::to_value(&snapshot).unwrap();

        for surface in [
            WIN_RATE_SURFACE,
            KDA_SURFACE,
            KP_SURFACE,
            DPM_SURFACE,
            POSITION_SURFACE,
            POSITION_KDA_SURFACE,
        ] {
            assert!(json.get(surface).is_some(), "missing {}", surface);
        }
        assert_eq!(json["position_filter"], "all");
    }

    #[test]
    fn test_json_dir_renderer_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = JsonDirRenderer::new(dir.path().to_path_buf());

        let config = kda_chart(&[]);
        renderer.draw(KDA_SURFACE, &config).unwrap();

        let path = dir.path().join("kdaChart.json");
        let contents = std::fs::read_to_string(path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json["chart"]["type"], "column");
    }

    #[tokio::test]
    async fn test_initialize_loads_from_live_server() {
        use crate::api::{build_router, state::AppState};
        use crate::fetch::{ClientConfig, PlayerClient};

        let state = AppState::new(sample_players());
        let app = build_router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = ClientConfig {
            endpoint: url::Url::parse(&format!("http://{}/api/players", addr)).unwrap(),
            ..ClientConfig::default()
        };
        let client = PlayerClient::new(config).unwrap();

        let mut controller = DashboardController::new(CapturingRenderer::default());
        controller.initialize(&client).await.unwrap();

        assert_eq!(controller.players().len(), 3);
        assert_eq!(controller.renderer.draws.len(), 6);
        let (_, win_rate) = &controller.renderer.draws[0];
        assert_eq!(categories(win_rate), vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_initialize_survives_unreachable_endpoint() {
        use crate::fetch::{ClientConfig, PlayerClient};

        // Bind a listener to reserve a port, then drop it so the
        // connection is refused.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ClientConfig {
            endpoint: url::Url::parse(&format!("http://{}/api/players", addr)).unwrap(),
            timeout: std::time::Duration::from_secs(2),
            ..ClientConfig::default()
        };
        let client = PlayerClient::new(config).unwrap();

        let mut controller = DashboardController::new(CapturingRenderer::default());
        controller.initialize(&client).await.unwrap();

        assert!(controller.players().is_empty());
        assert_eq!(controller.renderer.draws.len(), 6);
    }
}
