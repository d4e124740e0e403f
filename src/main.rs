use std::{io, time::Instant};

use log::info;

use tsp_exact_core::{
    ConsoleProgress, DistanceMatrix, NoProgress, Result, SolverOptions, logging,
    prompt_for_points, read_points_from_path, search, tour_metrics, write_report_to,
};

fn main() -> Result<()> {
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;
    info!("options: {options}");

    let points = match options.input_path() {
        Some(path) => read_points_from_path(path)?,
        None => prompt_for_points(io::stdin().lock(), io::stdout())?,
    };
    info!("input: n={}", points.len());

    let config = options.search_config()?;
    let now = Instant::now();
    let matrix = DistanceMatrix::from_points(&points)?;

    let mut solution = if options.progress {
        let mut progress = ConsoleProgress::new(io::stderr());
        progress.start();
        let solution = search(&matrix, config, &mut progress);
        progress.finish();
        solution?
    } else {
        search(&matrix, config, &mut NoProgress)?
    };
    solution.elapsed = now.elapsed();

    write_report_to(options.output_path(), &solution)?;

    info!(
        "output: n={} cost_km={:.3} time={:.2}s",
        solution.tour.len(),
        solution.cost_km,
        solution.elapsed.as_secs_f32()
    );
    tour_metrics(&solution.tour, &matrix);

    Ok(())
}
