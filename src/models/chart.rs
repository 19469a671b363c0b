//! Declarative chart configuration.
//!
//! The dashboard never draws anything itself. Each chart is described by a
//! [`ChartConfig`] whose JSON form matches what the charting library on the
//! host page expects: chart type, axes, tooltip format, and series data.

use serde::{Deserialize, Serialize};

/// Chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Column,
    Pie,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    #[serde(rename = "type")]
    pub kind: ChartKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    /// Empty string renders as no title, matching the leaderboard charts.
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub format: String,
}

/// Axis configuration. Only the fields a chart sets are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<AxisLabels>,
}

impl Axis {
    pub fn with_categories(categories: Vec<String>) -> Self {
        Self {
            categories,
            ..Default::default()
        }
    }

    pub fn with_title(text: impl Into<String>) -> Self {
        Self {
            title: Some(Title { text: text.into() }),
            ..Default::default()
        }
    }

    pub fn title(mut self, text: impl Into<String>) -> Self {
        self.title = Some(Title { text: text.into() });
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn label_format(mut self, format: impl Into<String>) -> Self {
        self.labels = Some(AxisLabels {
            format: format.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    #[serde(rename = "pointFormat")]
    pub point_format: String,
}

/// A named point in a pie series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPoint {
    pub name: String,
    pub y: f64,
}

/// Series payload: plain values for bar/column/line, named points for pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesData {
    Values(Vec<f64>),
    Points(Vec<NamedPoint>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Values(v) => v.len(),
            SeriesData::Points(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,

    pub data: SeriesData,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(
        rename = "colorByPoint",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub color_by_point: bool,
}

impl Series {
    /// A single-color series of plain values.
    pub fn values(name: impl Into<String>, data: Vec<f64>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: SeriesData::Values(data),
            color: Some(color.into()),
            color_by_point: false,
        }
    }

    /// A per-point-colored series of named points.
    pub fn points(name: impl Into<String>, data: Vec<NamedPoint>) -> Self {
        Self {
            name: name.into(),
            data: SeriesData::Points(data),
            color: None,
            color_by_point: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    pub enabled: bool,
}

/// Full declarative configuration for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub chart: ChartFrame,

    pub title: Title,

    #[serde(rename = "xAxis", default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<Axis>,

    #[serde(rename = "yAxis", default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<Axis>,

    pub tooltip: Tooltip,

    pub series: Vec<Series>,

    pub credits: Credits,
}

impl ChartConfig {
    /// Start a config with the given chart type, no title, and credits off.
    pub fn new(kind: ChartKind) -> Self {
        Self {
            chart: ChartFrame { kind },
            title: Title {
                text: String::new(),
            },
            x_axis: None,
            y_axis: None,
            tooltip: Tooltip {
                point_format: String::new(),
            },
            series: Vec::new(),
            credits: Credits { enabled: false },
        }
    }

    pub fn title(mut self, text: impl Into<String>) -> Self {
        self.title = Title { text: text.into() };
        self
    }

    pub fn x_axis(mut self, axis: Axis) -> Self {
        self.x_axis = Some(axis);
        self
    }

    pub fn y_axis(mut self, axis: Axis) -> Self {
        self.y_axis = Some(axis);
        self
    }

    pub fn tooltip(mut self, point_format: impl Into<String>) -> Self {
        self.tooltip = Tooltip {
            point_format: point_format.into(),
        };
        self
    }

    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }
}
