use shamba_core::error::ShambaError;

pub fn print<T: serde::Serialize>(value: &T) -> Result<(), ShambaError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
