//! A module for the main application logic of the pipe integrity assessment tool
use crate::batch::{evaluate_batch, read_assessments_from_file};
use crate::config::load_config;
use crate::engine::evaluate;

/// Runs one assessment from a YAML configuration file: validate, evaluate,
/// emit the output record as JSON, then work through the optional batch file.
pub fn run(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Running with configuration: {}", config_path);
    let conf = load_config(config_path)?;
    conf.validate()?;

    let input = conf.to_assessment();
    let result = evaluate(&input)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(batch) = &conf.batch {
        let cases = read_assessments_from_file(&batch.path)?;
        let results = evaluate_batch(&cases);
        for (row, outcome) in results.iter().enumerate() {
            match outcome {
                Ok(record) => println!("{}", serde_json::to_string(record)?),
                Err(err) => eprintln!("record {}: {}", row, err),
            }
        }
    }

    Ok(())
}
