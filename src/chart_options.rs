//! ApexCharts option trees for the dashboard charts.
//!
//! The server embeds one `ChartPayload` per chart: the data plus the few
//! layout values that vary per page (container, title, width, grade axes).
//! `build_options` turns it into the JSON option tree from one shared schema;
//! `label_hooks` lists the formatter functions the browser layer has to attach,
//! since functions cannot travel through JSON.

use crate::error::ChartError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const CHART_HEIGHT: u32 = 500;
const RATING_FILL: [&str; 2] = ["#df007a", "#00b0e8"];
const MONTH_FORMAT: &str = "MMM yyyy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    AscendsOverTime,
    AscendsPerX,
    AscendsPerGrade,
    FlashRatePerX,
    FlashRate,
    GradingAccuracy,
    MaxGradeOverTime,
    MaxGradePerX,
    RatingAccuracy,
    RatingPerX,
}

impl ChartKind {
    pub fn name(self) -> &'static str {
        match self {
            ChartKind::AscendsOverTime => "ascends-over-time",
            ChartKind::AscendsPerX => "ascends-per-x",
            ChartKind::AscendsPerGrade => "ascends-per-grade",
            ChartKind::FlashRatePerX => "flash-rate-per-x",
            ChartKind::FlashRate => "flash-rate",
            ChartKind::GradingAccuracy => "grading-accuracy",
            ChartKind::MaxGradeOverTime => "max-grade-over-time",
            ChartKind::MaxGradePerX => "max-grade-per-x",
            ChartKind::RatingAccuracy => "rating-accuracy",
            ChartKind::RatingPerX => "rating-per-x",
        }
    }

    fn chart_type(self) -> &'static str {
        match self {
            ChartKind::AscendsOverTime | ChartKind::MaxGradeOverTime => "area",
            ChartKind::FlashRate => "donut",
            ChartKind::GradingAccuracy | ChartKind::RatingAccuracy => "scatter",
            _ => "bar",
        }
    }

    /// "Per X" charts are rendered once per grouping, so the page names them.
    fn is_per_x(self) -> bool {
        matches!(
            self,
            ChartKind::AscendsPerX
                | ChartKind::FlashRatePerX
                | ChartKind::MaxGradePerX
                | ChartKind::RatingPerX
        )
    }

    fn stacked(self) -> bool {
        matches!(
            self,
            ChartKind::AscendsOverTime
                | ChartKind::AscendsPerX
                | ChartKind::AscendsPerGrade
                | ChartKind::FlashRatePerX
                | ChartKind::MaxGradeOverTime
                | ChartKind::MaxGradePerX
        )
    }

    fn animated(self) -> bool {
        matches!(
            self,
            ChartKind::AscendsOverTime
                | ChartKind::AscendsPerGrade
                | ChartKind::FlashRate
                | ChartKind::MaxGradeOverTime
        )
    }

    fn fixed_title(self) -> Option<&'static str> {
        match self {
            ChartKind::AscendsOverTime => Some("Ascends over time"),
            ChartKind::AscendsPerGrade => Some("Ascends per grade"),
            ChartKind::FlashRate => Some("Flash rate"),
            ChartKind::GradingAccuracy => Some("Grading accuracy"),
            ChartKind::MaxGradeOverTime => Some("Max grade over time"),
            ChartKind::RatingAccuracy => Some("Rating accuracy"),
            _ => None,
        }
    }

    fn fixed_width(self) -> Option<u32> {
        match self {
            ChartKind::AscendsOverTime | ChartKind::AscendsPerGrade => Some(750),
            ChartKind::MaxGradeOverTime => Some(650),
            ChartKind::GradingAccuracy | ChartKind::RatingAccuracy => Some(500),
            ChartKind::FlashRate => Some(350),
            _ => None,
        }
    }
}

/// A grade-valued axis: its label table and scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeAxis {
    pub labels: Vec<String>,
    pub max: f64,
    pub tick_amount: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub kind: ChartKind,
    pub series: Value,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub categories: Vec<Value>,
    /// Slice labels of the donut chart.
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub container: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    /// Y axis of the max-grade charts, both axes of grading accuracy.
    #[serde(default)]
    pub grade_axis: Option<GradeAxis>,
    /// X axis of grading accuracy when it differs from `grade_axis`.
    #[serde(default)]
    pub x_grade_axis: Option<GradeAxis>,
    /// Added to the stacked tooltip base when a lower series has a gap.
    #[serde(default)]
    pub gap_offset: Option<f64>,
}

fn missing(kind: ChartKind, field: &'static str) -> ChartError {
    ChartError::MissingField {
        chart: kind.name(),
        field,
    }
}

impl ChartPayload {
    /// Id of the element the chart renders into.
    pub fn container_id(&self) -> Result<&str, ChartError> {
        match &self.container {
            Some(id) => Ok(id),
            None if self.kind.is_per_x() => Err(missing(self.kind, "container")),
            None => Ok(self.kind.name()),
        }
    }

    fn title(&self) -> Result<&str, ChartError> {
        self.title
            .as_deref()
            .or(self.kind.fixed_title())
            .ok_or(missing(self.kind, "title"))
    }

    fn width(&self) -> Result<u32, ChartError> {
        self.width
            .or(self.kind.fixed_width())
            .ok_or(missing(self.kind, "width"))
    }

    fn grade_axis(&self) -> Result<&GradeAxis, ChartError> {
        self.grade_axis
            .as_ref()
            .ok_or(missing(self.kind, "grade_axis"))
    }

    fn x_grade_axis(&self) -> Result<&GradeAxis, ChartError> {
        self.x_grade_axis
            .as_ref()
            .map_or_else(|| self.grade_axis(), Ok)
    }

    fn gap_offset(&self) -> Result<f64, ChartError> {
        self.gap_offset.ok_or(missing(self.kind, "gap_offset"))
    }
}

fn breakpoint(at: u32, chart: Value) -> Value {
    json!({ "breakpoint": at, "options": { "chart": chart } })
}

fn responsive(kind: ChartKind) -> Value {
    if kind == ChartKind::FlashRate {
        return json!([
            breakpoint(400, json!({ "width": 300 })),
            breakpoint(350, json!({ "width": 300, "height": 300 })),
        ]);
    }
    let mut steps = Vec::new();
    if kind.fixed_width() == Some(750) {
        steps.push(breakpoint(1500, json!({ "width": 650 })));
    }
    for (at, width) in [(700, 500), (600, 440), (500, 380), (400, 320), (350, 260)] {
        steps.push(breakpoint(at, json!({ "width": width })));
    }
    Value::Array(steps)
}

fn legend(kind: ChartKind) -> Option<Value> {
    match kind {
        ChartKind::AscendsOverTime
        | ChartKind::AscendsPerX
        | ChartKind::AscendsPerGrade
        | ChartKind::MaxGradeOverTime
        | ChartKind::MaxGradePerX => Some(json!({
            "position": "top",
            "horizontalAlign": "center",
            "onItemClick": { "toggleDataSeries": true },
            "onItemHover": { "highlightDataSeries": true },
        })),
        ChartKind::FlashRate => Some(json!({
            "position": "top",
            "horizontalAlign": "center",
            "onItemClick": { "toggleDataSeries": false },
        })),
        ChartKind::GradingAccuracy => Some(json!({ "show": false })),
        _ => None,
    }
}

fn vertical_bars() -> Value {
    json!({ "bar": { "horizontal": false } })
}

fn smooth_stroke() -> Value {
    json!({ "curve": "smooth" })
}

fn gradient_fill() -> Value {
    json!({ "type": "gradient", "gradient": { "opacityFrom": 0.6, "opacityTo": 0.8 } })
}

fn category_axis(categories: &[Value]) -> Value {
    json!({ "type": "category", "categories": categories })
}

fn month_axis(categories: &[Value]) -> Value {
    json!({ "type": "datetime", "categories": categories, "labels": { "format": MONTH_FORMAT } })
}

fn ascends_axis() -> Value {
    json!({
        "min": 0,
        "decimalsInFloat": 0,
        "title": { "text": "Your ascends" },
        "forceNiceScale": true,
        "labels": { "minWidth": 15 },
    })
}

fn grade_y_axis(axis: &GradeAxis) -> Value {
    json!({
        "labels": { "minWidth": 15 },
        "min": 0,
        "max": axis.max,
        "tickAmount": axis.tick_amount,
        "title": { "text": "Your grade" },
    })
}

fn kind_options(payload: &ChartPayload) -> Result<Vec<(&'static str, Value)>, ChartError> {
    let categories = &payload.categories;
    let options = match payload.kind {
        ChartKind::AscendsOverTime => vec![
            ("stroke", smooth_stroke()),
            ("fill", gradient_fill()),
            ("xaxis", month_axis(categories)),
            ("tooltip", json!({ "x": { "format": MONTH_FORMAT } })),
            ("yaxis", ascends_axis()),
        ],
        ChartKind::AscendsPerX => vec![
            ("plotOptions", vertical_bars()),
            ("xaxis", category_axis(categories)),
            ("yaxis", ascends_axis()),
        ],
        ChartKind::AscendsPerGrade => vec![
            ("stroke", smooth_stroke()),
            ("plotOptions", vertical_bars()),
            ("xaxis", category_axis(categories)),
            ("yaxis", ascends_axis()),
        ],
        ChartKind::FlashRatePerX => vec![
            ("plotOptions", vertical_bars()),
            ("xaxis", category_axis(categories)),
            (
                "yaxis",
                json!({
                    "min": 0,
                    "decimalsInFloat": 0,
                    "max": 100,
                    "tickAmount": 10,
                    "title": { "text": "Your rates" },
                    "labels": { "minWidth": 15 },
                }),
            ),
        ],
        ChartKind::FlashRate => vec![
            ("labels", json!(payload.labels)),
            (
                "title",
                json!({ "text": payload.title()?, "align": "center", "offsetY": -5, "margin": 20 }),
            ),
        ],
        ChartKind::GradingAccuracy => {
            let x = payload.x_grade_axis()?;
            let y = payload.grade_axis()?;
            vec![
                ("fill", json!({ "type": "solid" })),
                ("markers", json!({ "size": 9 })),
                (
                    "xaxis",
                    json!({
                        "type": "numeric",
                        "min": 0,
                        "max": x.max,
                        "tickAmount": x.tick_amount,
                        "title": { "text": "Your grade" },
                    }),
                ),
                (
                    "yaxis",
                    json!({
                        "min": 0,
                        "max": y.max,
                        "tickAmount": y.tick_amount,
                        "title": { "text": "Average grade" },
                    }),
                ),
            ]
        }
        ChartKind::MaxGradeOverTime => {
            payload.gap_offset()?;
            vec![
                ("stroke", smooth_stroke()),
                ("fill", gradient_fill()),
                ("tooltip", json!({ "x": { "format": MONTH_FORMAT } })),
                ("yaxis", grade_y_axis(payload.grade_axis()?)),
                ("xaxis", month_axis(categories)),
            ]
        }
        ChartKind::MaxGradePerX => vec![
            ("plotOptions", vertical_bars()),
            ("xaxis", category_axis(categories)),
            ("yaxis", grade_y_axis(payload.grade_axis()?)),
        ],
        ChartKind::RatingAccuracy => vec![
            ("fill", json!({ "type": "solid" })),
            (
                "xaxis",
                json!({
                    "type": "numeric",
                    "min": 1,
                    "max": 5,
                    "tickAmount": 4,
                    "dataLabels": { "enabled": false },
                    "decimalsInFloat": 0,
                    "title": { "text": "Your rating" },
                }),
            ),
            (
                "yaxis",
                json!({
                    "min": 1,
                    "max": 5,
                    "tickAmount": 8,
                    "decimalsInFloat": 1,
                    "dataLabels": { "enabled": false },
                    "title": { "text": "Average rating" },
                }),
            ),
        ],
        ChartKind::RatingPerX => vec![
            ("plotOptions", vertical_bars()),
            ("fill", json!({ "type": "solid", "colors": RATING_FILL })),
            ("xaxis", category_axis(categories)),
            (
                "yaxis",
                json!({
                    "min": 0,
                    "max": 5,
                    "tickAmount": 10,
                    "decimalsInFloat": 1,
                    "title": { "text": "Your average rating" },
                    "labels": { "minWidth": 15 },
                }),
            ),
        ],
    };
    Ok(options)
}

/// Build the ApexCharts option tree for a payload.
pub fn build_options(payload: &ChartPayload) -> Result<Value, ChartError> {
    let kind = payload.kind;
    payload.container_id()?;

    let mut chart = json!({
        "type": kind.chart_type(),
        "height": CHART_HEIGHT,
        "width": payload.width()?,
        "toolbar": { "show": false },
        "zoom": { "enabled": false },
    });
    if kind.stacked() {
        chart["stacked"] = json!(true);
    }
    if !kind.animated() {
        chart["animations"] = json!({ "enabled": false });
    }

    let mut options = json!({
        "responsive": responsive(kind),
        "series": payload.series,
        "chart": chart,
        "dataLabels": { "enabled": false },
        "title": { "text": payload.title()?, "align": "center" },
    });
    if kind != ChartKind::RatingPerX {
        options["colors"] = json!(payload.colors);
    }
    if let Some(legend) = legend(kind) {
        options["legend"] = legend;
    }
    for (key, value) in kind_options(payload)? {
        options[key] = value;
    }
    Ok(options)
}

/// Which value a label formatter receives and how it turns it into text.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelRule {
    /// `"{value}%"`.
    Percent,
    /// Look the plotted value up in the grade table.
    GradeByValue(Vec<String>),
    /// Look the tick index up in the grade table.
    GradeByTick(Vec<String>),
    /// Add the stacked series below the point before looking the grade up.
    StackedGrade {
        labels: Vec<String>,
        gap_offset: Option<f64>,
    },
}

/// A formatter function to install at `path` inside the option tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelHook {
    pub path: &'static [&'static str],
    pub rule: LabelRule,
}

const TOOLTIP_Y: &[&str] = &["tooltip", "y", "formatter"];
const XAXIS_LABELS: &[&str] = &["xaxis", "labels", "formatter"];
const YAXIS_LABELS: &[&str] = &["yaxis", "labels", "formatter"];

pub fn label_hooks(payload: &ChartPayload) -> Result<Vec<LabelHook>, ChartError> {
    let hooks = match payload.kind {
        ChartKind::FlashRate | ChartKind::FlashRatePerX => vec![LabelHook {
            path: TOOLTIP_Y,
            rule: LabelRule::Percent,
        }],
        ChartKind::GradingAccuracy => vec![
            LabelHook {
                path: XAXIS_LABELS,
                rule: LabelRule::GradeByValue(payload.x_grade_axis()?.labels.clone()),
            },
            LabelHook {
                path: YAXIS_LABELS,
                rule: LabelRule::GradeByValue(payload.grade_axis()?.labels.clone()),
            },
        ],
        ChartKind::MaxGradeOverTime | ChartKind::MaxGradePerX => {
            let labels = payload.grade_axis()?.labels.clone();
            let gap_offset = match payload.kind {
                ChartKind::MaxGradeOverTime => Some(payload.gap_offset()?),
                _ => None,
            };
            vec![
                LabelHook {
                    path: YAXIS_LABELS,
                    rule: LabelRule::GradeByTick(labels.clone()),
                },
                LabelHook {
                    path: TOOLTIP_Y,
                    rule: LabelRule::StackedGrade { labels, gap_offset },
                },
            ]
        }
        _ => Vec::new(),
    };
    Ok(hooks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(kind: ChartKind) -> ChartPayload {
        ChartPayload {
            kind,
            series: json!([{ "name": "Flash", "data": [1, 2] }]),
            colors: vec!["#df007a".into()],
            categories: vec![json!("Wall 1"), json!("Wall 2")],
            labels: Vec::new(),
            container: None,
            title: None,
            width: None,
            grade_axis: None,
            x_grade_axis: None,
            gap_offset: None,
        }
    }

    fn grades() -> GradeAxis {
        GradeAxis {
            labels: vec!["5a".into(), "5b".into(), "5c".into()],
            max: 2.0,
            tick_amount: 2,
        }
    }

    #[test]
    fn fixed_charts_use_their_own_container_and_title() {
        let options = build_options(&payload(ChartKind::AscendsOverTime)).unwrap();
        assert_eq!(options["title"]["text"], "Ascends over time");
        assert_eq!(options["chart"]["type"], "area");
        assert_eq!(options["chart"]["width"], 750);
        assert_eq!(options["chart"]["stacked"], true);
        assert_eq!(options["xaxis"]["type"], "datetime");
        assert_eq!(options["responsive"].as_array().unwrap().len(), 6);
        assert_eq!(
            payload(ChartKind::AscendsOverTime).container_id().unwrap(),
            "ascends-over-time"
        );
    }

    #[test]
    fn per_x_charts_need_container_title_and_width() {
        let mut p = payload(ChartKind::AscendsPerX);
        assert_eq!(
            build_options(&p),
            Err(ChartError::MissingField {
                chart: "ascends-per-x",
                field: "container"
            })
        );

        p.container = Some("ascends-per-wall".into());
        p.title = Some("Ascends per wall".into());
        p.width = Some(600);
        let options = build_options(&p).unwrap();
        assert_eq!(options["title"]["text"], "Ascends per wall");
        assert_eq!(options["chart"]["width"], 600);
        assert_eq!(options["chart"]["animations"]["enabled"], false);
        assert_eq!(options["xaxis"]["categories"][1], "Wall 2");
        assert_eq!(options["responsive"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn donut_has_its_own_breakpoints_and_title_spacing() {
        let mut p = payload(ChartKind::FlashRate);
        p.labels = vec!["Flash".into(), "Top".into()];
        let options = build_options(&p).unwrap();
        assert_eq!(options["chart"]["type"], "donut");
        assert_eq!(options["labels"][0], "Flash");
        assert_eq!(options["title"]["margin"], 20);
        assert_eq!(options["responsive"][1]["options"]["chart"]["height"], 300);
        assert!(options["chart"].get("stacked").is_none());
    }

    #[test]
    fn rating_per_x_uses_fixed_fill_instead_of_colors() {
        let mut p = payload(ChartKind::RatingPerX);
        p.container = Some("rating-per-wall".into());
        p.title = Some("Rating per wall".into());
        p.width = Some(500);
        let options = build_options(&p).unwrap();
        assert!(options.get("colors").is_none());
        assert_eq!(options["fill"]["colors"][0], "#df007a");
        assert!(options["chart"].get("stacked").is_none());
    }

    #[test]
    fn grade_charts_require_an_axis() {
        let mut p = payload(ChartKind::MaxGradeOverTime);
        p.gap_offset = Some(1.0);
        assert!(matches!(
            build_options(&p),
            Err(ChartError::MissingField { field: "grade_axis", .. })
        ));

        p.grade_axis = Some(grades());
        let options = build_options(&p).unwrap();
        assert_eq!(options["yaxis"]["max"], 2.0);
        assert_eq!(options["yaxis"]["tickAmount"], 2);
    }

    #[test]
    fn max_grade_over_time_needs_gap_offset() {
        let mut p = payload(ChartKind::MaxGradeOverTime);
        p.grade_axis = Some(grades());
        assert!(matches!(
            build_options(&p),
            Err(ChartError::MissingField { field: "gap_offset", .. })
        ));
    }

    #[test]
    fn grading_accuracy_falls_back_to_shared_axis() {
        let mut p = payload(ChartKind::GradingAccuracy);
        p.grade_axis = Some(grades());
        let options = build_options(&p).unwrap();
        assert_eq!(options["xaxis"]["max"], 2.0);
        assert_eq!(options["legend"]["show"], false);

        let hooks = label_hooks(&p).unwrap();
        assert_eq!(hooks.len(), 2);
        assert_eq!(hooks[0].path, XAXIS_LABELS);
    }

    #[test]
    fn max_grade_per_x_hooks_have_no_gap_offset() {
        let mut p = payload(ChartKind::MaxGradePerX);
        p.grade_axis = Some(grades());
        let hooks = label_hooks(&p).unwrap();
        assert_eq!(
            hooks[1].rule,
            LabelRule::StackedGrade {
                labels: grades().labels,
                gap_offset: None
            }
        );
    }

    #[test]
    fn payload_deserializes_from_page_json() {
        let p: ChartPayload = serde_json::from_str(
            r##"{"kind": "flash-rate-per-x", "series": [], "container": "flash-rate-per-wall",
                "title": "Flash rate per wall", "width": 480, "colors": ["#00b0e8"]}"##,
        )
        .unwrap();
        assert_eq!(p.kind, ChartKind::FlashRatePerX);
        assert_eq!(label_hooks(&p).unwrap()[0].rule, LabelRule::Percent);
        assert_eq!(build_options(&p).unwrap()["yaxis"]["max"], 100);
    }
}
