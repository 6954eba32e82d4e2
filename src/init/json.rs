use crate::{GenParams, Limits, LevelConfig, PadBounds, Physics, TerrainPlan};
use json::{self, JsonValue};
use std::{fs::File, io::Read};

macro_rules! get_json {
    ($json:ident,$($key:literal),+, $func:ident) => {
            get_json!($json$([$key])+, concat!($("/",$key),+), $func)
    };

    ($value:expr, $key:expr, $func:ident) => {
        $value
            .$func()
            .ok_or(concat!("Couldn't find ", $key))?
    };
}

macro_rules! json_value_or_err {
    ($json:ident,$($key:literal),+) => {
            {
                let value = &$json$([$key])+;
                if value.is_null() {
                    Err(concat!("Lacking", concat!($("/",$key),+), " key"))
                }else{
                    Ok(value)
                }
            }
    };
}

pub fn parse_level(level_file_path: &String) -> Result<LevelConfig, String> {
    parse_level_str(&read_file(level_file_path)?)
}

pub fn parse_level_str(content: &str) -> Result<LevelConfig, String> {
    let level_json = json::parse(content).map_err(|e| format!("Json error: {e}"))?;

    let world_width = get_json!(level_json, "World", "Width", as_f64);
    let config = LevelConfig {
        name: get_json!(level_json, "Name", as_str).to_owned(),
        world_width,
        world_height: get_json!(level_json, "World", "Height", as_f64),
        physics: Physics::default()
            .with_gravity(get_json!(level_json, "Physics", "Gravity", as_f64))
            .with_thrust_power(get_json!(level_json, "Physics", "Thrust", as_f64))
            .with_rotation_speed(get_json!(level_json, "Physics", "RotationSpeed", as_f64))
            .with_fuel_burn(get_json!(level_json, "Physics", "FuelBurn", as_f64)),
        limits: Limits::default()
            .with_safe_vy(get_json!(level_json, "Safety", "MaxVy", as_f64))
            .with_safe_vx(get_json!(level_json, "Safety", "MaxVx", as_f64))
            .with_safe_angle(get_json!(level_json, "Safety", "MaxAngle", as_f64)),
        spawn_x: get_json!(level_json, "Craft", "X", as_f64),
        spawn_y: get_json!(level_json, "Craft", "Y", as_f64),
        start_fuel: get_json!(level_json, "Craft", "Fuel", as_f64),
        half_width: get_json!(level_json, "Craft", "HalfWidth", as_f64),
        half_height: get_json!(level_json, "Craft", "HalfHeight", as_f64),
        terrain: parse_plan(&level_json, world_width)?,
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn read_file(file_path: &String) -> Result<String, String> {
    let mut file_content = String::new();
    let mut file =
        File::open(file_path).map_err(|e| format!("Error while opening file {file_path}: {e}"))?;

    file.read_to_string(&mut file_content)
        .map_err(|e| format!("Failed to read file: {e}"))?;
    Ok(file_content)
}

fn parse_plan(level_json: &JsonValue, world_width: f64) -> Result<TerrainPlan, String> {
    let terrain = json_value_or_err!(level_json, "Terrain")?;
    if terrain.is_array() {
        let (x, y) = parse_profile(terrain)?;
        let pad = parse_pad(json_value_or_err!(level_json, "Pad")?)?;
        Ok(TerrainPlan::Explicit { x, y, pad })
    } else if !terrain["Ground"].is_null() {
        Ok(TerrainPlan::Flat {
            ground_y: get_json!(terrain, "Ground", as_f64),
            pad_x: get_json!(terrain, "PadX", as_f64),
        })
    } else if !terrain["Generate"].is_null() {
        Ok(TerrainPlan::Generated(parse_gen_params(
            &terrain["Generate"],
            world_width,
        )))
    } else {
        Err("Terrain has to be a vertex array, a Ground strip or a Generate block".to_owned())
    }
}

// Every Generate key is optional; absent keys keep the stock parameters.
fn parse_gen_params(gen_json: &JsonValue, world_width: f64) -> GenParams {
    let mut params = GenParams::default().with_width(world_width);
    if let Some(v) = gen_json["StepXMin"].as_f64() {
        params.step_x_min = v;
    }
    if let Some(v) = gen_json["StepXMax"].as_f64() {
        params.step_x_max = v;
    }
    if let Some(v) = gen_json["StepYMax"].as_f64() {
        params.step_y_max = v;
    }
    if let Some(v) = gen_json["BandMin"].as_f64() {
        params.band_min = v;
    }
    if let Some(v) = gen_json["BandMax"].as_f64() {
        params.band_max = v;
    }
    if let Some(v) = gen_json["ShelfMargin"].as_usize() {
        params.shelf_margin = v;
    }
    if let Some(v) = gen_json["PadWidth"].as_f64() {
        params.pad_width = v;
    }
    if let Some(v) = gen_json["PadHeight"].as_f64() {
        params.pad_height = v;
    }
    params
}

fn parse_pad(pad_json: &JsonValue) -> Result<PadBounds, String> {
    Ok(PadBounds {
        x: get_json!(pad_json, "X", as_f64),
        y: get_json!(pad_json, "Y", as_f64),
        width: get_json!(pad_json, "Width", as_f64),
        height: get_json!(pad_json, "Height", as_f64),
    })
}

fn parse_profile(terrain_array: &JsonValue) -> Result<(Vec<f64>, Vec<f64>), String> {
    terrain_array
        .members()
        .map(|point_json| {
            let err_str = "Terrain has to contain numeric vertices";
            let x = point_json[0].as_f64().ok_or(err_str)?;
            let y = point_json[1].as_f64().ok_or(err_str)?;
            Ok((x, y))
        })
        .try_fold(
            (Vec::new(), Vec::new()),
            |(mut xs, mut ys), xy: Result<(f64, f64), String>| {
                let (x, y) = xy?;
                xs.push(x);
                ys.push(y);
                Ok::<(Vec<f64>, Vec<f64>), String>((xs, ys))
            },
        )
}
