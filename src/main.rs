//! Demo: arma el pipeline stub de análisis (load -> segment -> measure),
//! lo corre en modo verboso y exporta el record. Pensado como plantilla:
//! una instancia de `Pipe` por par de stacks, repartidas entre procesos
//! trabajadores por el llamador.

use pipe_adapters::{LoadStack, MeasureRegions, SegmentStack};
use pipe_core::{Pipe, PipeError};
use serde_json::json;

fn build_pipeline(stack_path: &str) -> Result<Pipe, PipeError> {
    let mut pipe = Pipe::new();
    pipe.verbose = true;

    let load = pipe.add(LoadStack);
    pipe.get_mut(&load)?.set_param("path", json!(stack_path))?;
    pipe.then(SegmentStack)?;
    pipe.then(MeasureRegions)?;
    Ok(pipe)
}

fn run() -> Result<(), PipeError> {
    // Cargar .env si existe (ruta de dump opcional).
    let _ = dotenvy::dotenv();
    let stack_path = std::env::var("PIPE_STACK_PATH").unwrap_or_else(|_| "stacks/foci_pair_001.tif".to_string());

    let mut pipe = build_pipeline(&stack_path)?;
    pipe.run()?;

    let metrics = &pipe.get("measure_regions")?.result().values[0];
    println!("metrics: {metrics}");
    println!("record fingerprint: {}", pipe.record_fingerprint()?);

    if let Ok(dump_path) = std::env::var("PIPE_DUMP_PATH") {
        pipe.dump(&dump_path)?;
        println!("record dumped to {dump_path}");
    } else {
        println!("record: {}", pipe.to_json()?);
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("[pipeflow] error: {e}");
        std::process::exit(1);
    }
}
