use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use json::{JsonValue, object};

use crate::{
    error::{FilterError, Result},
    filter::{
        ConvolveKernel, DEFAULT_BRIGHTNESS, DEFAULT_CONTRAST, DEFAULT_GAMMA, DEFAULT_LEVELS,
        DEFAULT_MAP_SIZE, DEFAULT_NUM_COLORS, Filter,
    },
    tone_curve::{ControlPoint, ToneCurve},
    transform::convolution::{Kernel, KernelPreset},
};

/// Ordered list of filters to run on an image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessConfig {
    pub filters: Vec<Filter>,
}

impl ProcessConfig {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    /// Parse and validate a JSON configuration.
    ///
    /// ```json
    /// { "filters": [ { "type": "gamma", "gamma": 2.2 }, { "type": "invert" } ] }
    /// ```
    pub fn from_json(json_string: &str) -> Result<ProcessConfig> {
        let json = json::parse(json_string)?;

        let filters = &json["filters"];
        if filters.is_null() {
            return Ok(ProcessConfig::default());
        }
        if !filters.is_array() {
            return Err(FilterError::config("`filters` should be an array"));
        }

        let filters = filters
            .members()
            .enumerate()
            .map(|(index, value)| {
                let filter = parse_filter(value)
                    .map_err(|e| FilterError::config(format!("filters[{}]: {}", index, e)))?;
                filter.validate()?;
                Ok(filter)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ProcessConfig { filters })
    }

    pub fn to_json(&self) -> String {
        let filters: Vec<JsonValue> = self.filters.iter().map(JsonValue::from).collect();
        let data = object! { filters: filters };
        data.pretty(2)
    }

    pub fn read_config<P: AsRef<Path>>(path: P) -> Result<ProcessConfig> {
        let mut file = File::open(path)?;
        let mut json_string = String::new();
        file.read_to_string(&mut json_string)?;

        ProcessConfig::from_json(&json_string)
    }

    pub fn write_config<P: AsRef<Path>>(&self, path: P) -> Result {
        let mut file = File::create(path)?;
        file.write_all(self.to_json().as_bytes())?;
        Ok(())
    }
}

fn parse_filter(value: &JsonValue) -> std::result::Result<Filter, String> {
    let kind = value["type"]
        .as_str()
        .ok_or_else(|| String::from("missing string field `type`"))?;

    let filter = match kind {
        "invert" => Filter::Invert,
        "dilate" => Filter::Dilate,
        "erode" => Filter::Erode,
        "grayscale" => Filter::Grayscale,
        "luma_chroma_dither" => Filter::LumaChromaDither,
        "brightness" => Filter::Brightness {
            factor: field(value, "factor", JsonValue::as_i32, DEFAULT_BRIGHTNESS)?,
        },
        "contrast" => Filter::Contrast {
            factor: field(value, "factor", JsonValue::as_f64, DEFAULT_CONTRAST)?,
        },
        "gamma" => Filter::Gamma {
            gamma: field(value, "gamma", JsonValue::as_f64, DEFAULT_GAMMA)?,
        },
        "quantize" => Filter::Quantize {
            num_colors: field(value, "num_colors", JsonValue::as_usize, DEFAULT_NUM_COLORS)?,
        },
        "ordered_dither" => Filter::OrderedDither {
            map_size: field(value, "map_size", JsonValue::as_usize, DEFAULT_MAP_SIZE)?,
            levels: field(value, "levels", JsonValue::as_usize, DEFAULT_LEVELS)?,
        },
        "tone_curve" => Filter::ToneCurve {
            curve: parse_curve(&value["points"])?,
        },
        "convolve" => Filter::Convolve {
            kernel: parse_kernel(value)?,
        },
        other => match KernelPreset::from_name(other) {
            Some(preset) => Filter::Convolve {
                kernel: ConvolveKernel::Preset(preset),
            },
            None => return Err(format!("unknown filter type `{}`", other)),
        },
    };
    Ok(filter)
}

/// Optional field, `default` when absent, error when of the wrong type.
fn field<T>(
    value: &JsonValue,
    key: &str,
    get: impl Fn(&JsonValue) -> Option<T>,
    default: T,
) -> std::result::Result<T, String> {
    let field = &value[key];
    if field.is_null() {
        return Ok(default);
    }
    get(field).ok_or_else(|| format!("couldn't parse `{}`", key))
}

fn parse_curve(points: &JsonValue) -> std::result::Result<ToneCurve, String> {
    if points.is_null() {
        return Ok(ToneCurve::identity());
    }
    let points = points
        .members()
        .map(|point| match (point[0].as_f64(), point[1].as_f64()) {
            (Some(x), Some(y)) if point.len() == 2 => Ok(ControlPoint::new(x, y)),
            _ => Err(String::from("`points` should be an array of [x, y] pairs")),
        })
        .collect::<std::result::Result<Vec<_>, String>>()?;
    ToneCurve::new(points).map_err(|e| e.to_string())
}

fn parse_kernel(value: &JsonValue) -> std::result::Result<ConvolveKernel, String> {
    if let Some(name) = value["preset"].as_str() {
        return KernelPreset::from_name(name)
            .map(ConvolveKernel::Preset)
            .ok_or_else(|| format!("unknown kernel preset `{}`", name));
    }

    let rows = &value["kernel"];
    if !rows.is_array() {
        return Err(String::from("convolve needs a `preset` or a `kernel` matrix"));
    }
    let rows = rows
        .members()
        .map(|row| {
            row.members()
                .map(|weight| {
                    weight
                        .as_f64()
                        .ok_or_else(|| String::from("kernel weights should be numbers"))
                })
                .collect::<std::result::Result<Vec<f64>, String>>()
        })
        .collect::<std::result::Result<Vec<_>, String>>()?;
    Kernel::from_rows(&rows)
        .map(ConvolveKernel::Custom)
        .map_err(|e| e.to_string())
}

impl From<&Filter> for JsonValue {
    fn from(filter: &Filter) -> Self {
        let mut data = JsonValue::new_object();
        data["type"] = filter.name().into();

        match filter {
            Filter::Brightness { factor } => data["factor"] = (*factor).into(),
            Filter::Contrast { factor } => data["factor"] = (*factor).into(),
            Filter::Gamma { gamma } => data["gamma"] = (*gamma).into(),
            Filter::Quantize { num_colors } => data["num_colors"] = (*num_colors).into(),
            Filter::OrderedDither { map_size, levels } => {
                data["map_size"] = (*map_size).into();
                data["levels"] = (*levels).into();
            }
            Filter::ToneCurve { curve } => {
                let points: Vec<JsonValue> = curve
                    .points()
                    .iter()
                    .map(|p| JsonValue::from(vec![p.x, p.y]))
                    .collect();
                data["points"] = points.into();
            }
            Filter::Convolve {
                kernel: ConvolveKernel::Preset(preset),
            } => data["preset"] = preset.name().into(),
            Filter::Convolve {
                kernel: ConvolveKernel::Custom(kernel),
            } => {
                let rows: Vec<JsonValue> = kernel
                    .rows()
                    .map(|row| JsonValue::from(row.to_vec()))
                    .collect();
                data["kernel"] = rows.into();
            }
            _ => {}
        }
        data
    }
}
