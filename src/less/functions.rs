//! Built-in functions.

use super::{
    color::Color,
    error::{Error, ErrorKind, Result},
    value::{Number, Value},
};

type FunctionResult = std::result::Result<Value, String>;

/// Call a built-in function on evaluated arguments.
///
/// Returns `None` for unknown functions, which are rendered as CSS.
pub(crate) fn call(name: &str, args: &[Value]) -> Option<Result<Value>> {
    let result = match name.to_ascii_lowercase().as_str() {
        "rgb" => rgb(args),
        "rgba" => rgba(args),
        "hsl" => hsl(args),
        "hsla" => hsla(args),
        "lighten" => adjust_hsl(args, |hsl, amount| hsl.l += amount),
        "darken" => adjust_hsl(args, |hsl, amount| hsl.l -= amount),
        "saturate" => adjust_hsl(args, |hsl, amount| hsl.s += amount),
        "desaturate" => adjust_hsl(args, |hsl, amount| hsl.s -= amount),
        "spin" => spin(args),
        "greyscale" => greyscale(args),
        "fadein" => adjust_alpha(args, |alpha, amount| alpha + amount),
        "fadeout" => adjust_alpha(args, |alpha, amount| alpha - amount),
        "fade" => adjust_alpha(args, |_, amount| amount),
        "mix" => mix(args),
        "percentage" => percentage(args),
        "round" => round(args),
        "ceil" => math(args, f64::ceil),
        "floor" => math(args, f64::floor),
        "abs" => math(args, f64::abs),
        "unit" => unit(args),
        "e" => escape(args),
        _ => return None,
    };

    Some(result.map_err(|message| {
        Error::new(
            ErrorKind::Argument,
            format!("error evaluating function `{name}`: {message}"),
        )
    }))
}

fn expect_args(args: &[Value], min: usize, max: usize) -> std::result::Result<(), String> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{min} to {max}")
        };
        return Err(format!(
            "expected {expected} arguments, got {}",
            args.len()
        ));
    }
    Ok(())
}

fn number(args: &[Value], index: usize) -> std::result::Result<&Number, String> {
    match args.get(index) {
        Some(Value::Number(number)) => Ok(number),
        Some(other) => Err(format!("`{}` is not a number", other.to_css(false))),
        None => Err("missing argument".to_owned()),
    }
}

fn color(args: &[Value], index: usize) -> std::result::Result<Color, String> {
    let value = args.get(index).ok_or("missing argument")?;
    value
        .as_color()
        .ok_or_else(|| format!("`{}` is not a color", value.to_css(false)))
}

/// Color channel in `0..=255`; percentages are scaled.
fn channel(number: &Number) -> f64 {
    if number.unit == "%" {
        number.value * 2.55
    } else {
        number.value
    }
}

/// Fraction in `0..=1`, from a percentage or a plain number.
fn fraction(number: &Number) -> f64 {
    if number.unit == "%" || number.value > 1.0 {
        number.value / 100.0
    } else {
        number.value
    }
}

fn rgb(args: &[Value]) -> FunctionResult {
    expect_args(args, 3, 3)?;
    let rgb = [
        channel(number(args, 0)?),
        channel(number(args, 1)?),
        channel(number(args, 2)?),
    ];
    Ok(Value::Color(Color::from_rgb(rgb)))
}

fn rgba(args: &[Value]) -> FunctionResult {
    if args.len() == 2 {
        let color = color(args, 0)?;
        let alpha = fraction(number(args, 1)?);
        return Ok(Value::Color(Color::from_rgba(color.rgb, alpha)));
    }
    expect_args(args, 4, 4)?;
    let rgb = [
        channel(number(args, 0)?),
        channel(number(args, 1)?),
        channel(number(args, 2)?),
    ];
    let alpha = fraction(number(args, 3)?);
    Ok(Value::Color(Color::from_rgba(rgb, alpha)))
}

fn hsl_components(args: &[Value]) -> std::result::Result<super::color::Hsl, String> {
    Ok(super::color::Hsl {
        h: number(args, 0)?.value,
        s: fraction(number(args, 1)?),
        l: fraction(number(args, 2)?),
    })
}

fn hsl(args: &[Value]) -> FunctionResult {
    expect_args(args, 3, 3)?;
    Ok(Value::Color(Color::from_hsla(hsl_components(args)?, 1.0)))
}

fn hsla(args: &[Value]) -> FunctionResult {
    expect_args(args, 4, 4)?;
    let alpha = fraction(number(args, 3)?);
    Ok(Value::Color(Color::from_hsla(hsl_components(args)?, alpha)))
}

fn adjust_hsl(args: &[Value], f: impl Fn(&mut super::color::Hsl, f64)) -> FunctionResult {
    expect_args(args, 2, 2)?;
    let color = color(args, 0)?;
    let amount = number(args, 1)?.value / 100.0;
    let mut hsl = color.to_hsl();
    f(&mut hsl, amount);
    hsl.s = hsl.s.clamp(0.0, 1.0);
    hsl.l = hsl.l.clamp(0.0, 1.0);
    Ok(Value::Color(Color::from_hsla(hsl, color.alpha)))
}

fn spin(args: &[Value]) -> FunctionResult {
    expect_args(args, 2, 2)?;
    let color = color(args, 0)?;
    let mut hsl = color.to_hsl();
    hsl.h = (hsl.h + number(args, 1)?.value).rem_euclid(360.0);
    Ok(Value::Color(Color::from_hsla(hsl, color.alpha)))
}

fn greyscale(args: &[Value]) -> FunctionResult {
    expect_args(args, 1, 1)?;
    let color = color(args, 0)?;
    let mut hsl = color.to_hsl();
    hsl.s = 0.0;
    Ok(Value::Color(Color::from_hsla(hsl, color.alpha)))
}

fn adjust_alpha(args: &[Value], f: impl Fn(f64, f64) -> f64) -> FunctionResult {
    expect_args(args, 2, 2)?;
    let color = color(args, 0)?;
    let amount = number(args, 1)?.value / 100.0;
    let alpha = f(color.alpha, amount).clamp(0.0, 1.0);
    Ok(Value::Color(Color::from_rgba(color.rgb, alpha)))
}

fn mix(args: &[Value]) -> FunctionResult {
    expect_args(args, 2, 3)?;
    let first = color(args, 0)?;
    let second = color(args, 1)?;
    let weight = match args.get(2) {
        Some(_) => number(args, 2)?.value / 100.0,
        None => 0.5,
    };
    Ok(Value::Color(first.mix(&second, weight)))
}

fn percentage(args: &[Value]) -> FunctionResult {
    expect_args(args, 1, 1)?;
    let number = number(args, 0)?;
    Ok(Value::Number(Number::new(number.value * 100.0, "%")))
}

fn round(args: &[Value]) -> FunctionResult {
    expect_args(args, 1, 2)?;
    let value = number(args, 0)?;
    let places = match args.get(1) {
        Some(_) => number(args, 1)?.value.max(0.0),
        None => 0.0,
    };
    let factor = 10f64.powf(places);
    Ok(Value::Number(Number::new(
        (value.value * factor).round() / factor,
        value.unit.clone(),
    )))
}

fn math(args: &[Value], f: fn(f64) -> f64) -> FunctionResult {
    expect_args(args, 1, 1)?;
    let value = number(args, 0)?;
    Ok(Value::Number(Number::new(f(value.value), value.unit.clone())))
}

fn unit(args: &[Value]) -> FunctionResult {
    expect_args(args, 1, 2)?;
    let value = number(args, 0)?;
    let unit = match args.get(1) {
        Some(Value::Keyword(unit)) => unit.clone(),
        Some(Value::Quoted { text, .. }) => text.clone(),
        Some(other) => return Err(format!("`{}` is not a unit", other.to_css(false))),
        None => String::new(),
    };
    Ok(Value::Number(Number::new(value.value, unit)))
}

fn escape(args: &[Value]) -> FunctionResult {
    expect_args(args, 1, 1)?;
    match &args[0] {
        Value::Quoted { text, .. } => Ok(Value::Anonymous(text.clone())),
        other => Err(format!("`{}` is not a string", other.to_css(false))),
    }
}
