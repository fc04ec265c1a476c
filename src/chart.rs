//! JavaScript interop for ApexCharts.
//! Builds option trees from `chart_options`, attaches the label formatters as
//! Rust closures and renders into the payload's container.

use crate::chart_options::{build_options, label_hooks, ChartPayload, LabelHook, LabelRule};
use crate::config::CHART_DATA_SELECTOR;
use crate::error::ChartError;
use crate::labels::{grade_label, percent_label, stacked_grade_label};
use js_sys::{Object, Reflect};
use log::{info, warn};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    pub type ApexCharts;

    #[wasm_bindgen(constructor, catch)]
    fn new(el: &Element, options: &JsValue) -> Result<ApexCharts, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn render(this: &ApexCharts) -> Result<JsValue, JsValue>;
}

fn script_error(e: JsValue) -> ChartError {
    ChartError::Script(format!("{:?}", e))
}

/// Set `value` at `path`, creating intermediate objects as needed.
fn set_path(root: &JsValue, path: &[&str], value: &JsValue) -> Result<(), ChartError> {
    let (last, parents) = path
        .split_last()
        .ok_or_else(|| ChartError::Options("empty formatter path".to_string()))?;
    let mut node = root.clone();
    for key in parents {
        let key = JsValue::from_str(key);
        let mut child = Reflect::get(&node, &key).map_err(script_error)?;
        if !child.is_object() {
            child = Object::new().into();
            Reflect::set(&node, &key, &child).map_err(script_error)?;
        }
        node = child;
    }
    Reflect::set(&node, &JsValue::from_str(last), value).map_err(script_error)?;
    Ok(())
}

fn text_or_undefined(text: Option<&str>) -> JsValue {
    text.map(JsValue::from_str).unwrap_or(JsValue::UNDEFINED)
}

fn field(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

/// `w.globals.series` of a tooltip callback, with holes as `None`.
fn stacked_series(opts: &JsValue) -> Vec<Vec<Option<f64>>> {
    let raw = field(&field(&field(opts, "w"), "globals"), "series");
    serde_wasm_bindgen::from_value(raw).unwrap_or_default()
}

fn formatter(rule: LabelRule) -> JsValue {
    match rule {
        LabelRule::Percent => Closure::<dyn Fn(JsValue) -> JsValue>::new(|val: JsValue| {
            JsValue::from_str(&percent_label(val.as_f64().unwrap_or(f64::NAN)))
        })
        .into_js_value(),
        LabelRule::GradeByValue(labels) => {
            Closure::<dyn Fn(JsValue) -> JsValue>::new(move |val: JsValue| {
                text_or_undefined(grade_label(&labels, val.as_f64().unwrap_or(f64::NAN)))
            })
            .into_js_value()
        }
        LabelRule::GradeByTick(labels) => {
            Closure::<dyn Fn(JsValue, JsValue) -> JsValue>::new(
                move |_val: JsValue, index: JsValue| {
                    text_or_undefined(grade_label(&labels, index.as_f64().unwrap_or(f64::NAN)))
                },
            )
            .into_js_value()
        }
        LabelRule::StackedGrade { labels, gap_offset } => {
            Closure::<dyn Fn(JsValue, JsValue) -> JsValue>::new(
                move |val: JsValue, opts: JsValue| {
                    let (Some(value), Some(series_index), Some(point)) = (
                        val.as_f64(),
                        field(&opts, "seriesIndex").as_f64(),
                        field(&opts, "dataPointIndex").as_f64(),
                    ) else {
                        return JsValue::UNDEFINED;
                    };
                    let series = stacked_series(&opts);
                    text_or_undefined(stacked_grade_label(
                        &labels,
                        value,
                        &series,
                        series_index as usize,
                        point as usize,
                        gap_offset,
                    ))
                },
            )
            .into_js_value()
        }
    }
}

fn attach(options: &JsValue, hooks: Vec<LabelHook>) -> Result<(), ChartError> {
    for hook in hooks {
        set_path(options, hook.path, &formatter(hook.rule))?;
    }
    Ok(())
}

/// Render one chart into its container.
pub fn render_chart(payload: &ChartPayload) -> Result<ApexCharts, ChartError> {
    let options = build_options(payload)?;
    let js_options = options
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| ChartError::Options(e.to_string()))?;
    attach(&js_options, label_hooks(payload)?)?;

    let container = payload.container_id()?;
    let element = gloo_utils::document()
        .get_element_by_id(container)
        .ok_or_else(|| ChartError::MissingContainer(container.to_string()))?;

    let chart = ApexCharts::new(&element, &js_options).map_err(script_error)?;
    chart.render().map_err(script_error)?;
    Ok(chart)
}

/// Chart payloads embedded in the page as `<script class="chart-data">`.
pub fn embedded_payloads() -> Vec<ChartPayload> {
    let Ok(nodes) = gloo_utils::document().query_selector_all(CHART_DATA_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .filter_map(|el| {
            let text = el.text_content().unwrap_or_default();
            match serde_json::from_str::<ChartPayload>(&text) {
                Ok(payload) => Some(payload),
                Err(e) => {
                    warn!("Skipping malformed chart payload: {}", e);
                    None
                }
            }
        })
        .collect()
}

/// Render every embedded chart; a broken chart does not stop the others.
pub fn render_all() -> usize {
    let mut rendered = 0;
    for payload in embedded_payloads() {
        match render_chart(&payload) {
            Ok(_) => rendered += 1,
            Err(e) => warn!("Chart '{}' not rendered: {}", payload.kind.name(), e),
        }
    }
    info!("Rendered {} chart(s)", rendered);
    rendered
}
