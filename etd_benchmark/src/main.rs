use std::{
    f64::consts::PI,
    hint::black_box,
    time::{Duration, Instant},
};

use etd_solver::{
    soliton::{max_relative_error, two_solitons},
    system::spectral::PhysicalMeasurement,
    Etdrk4Solver, Ifrk4Solver, Method, SimulationConfig, Solver, SolverError, SpectralSystem,
};
use ndarray::Array1;

const ALPHA: [f64; 2] = [25.0, 16.0];
const OFFSETS: [f64; 2] = [1.0, 2.0];

/// Integrate the two soliton problem in a single output stride,
/// returning the relative error at `t_end` and the time taken
fn soliton_run<S: Solver>(
    solver: &S,
    system: &SpectralSystem,
    t_end: f64,
    n: usize,
) -> Result<(f64, Duration), SolverError> {
    let initial = two_solitons(0.0, system.grid(), ALPHA, OFFSETS, 1.0);
    let initial_state = system.to_spectral(&initial)?;
    let measurement = PhysicalMeasurement { system };

    let start = Instant::now();
    let result = black_box(solver.solve(&initial_state, system, &measurement, (0.0, t_end), n, n)?);
    let elapsed = start.elapsed();

    let reference = two_solitons(t_end, system.grid(), ALPHA, OFFSETS, 1.0);
    Ok((max_relative_error(&result[1], &reference), elapsed))
}

/// Compare the accuracy and cost of both schemes on the two soliton
/// solution of `KdV` as the number of steps is increased
fn soliton_comparison() -> Result<(), SolverError> {
    let system = SpectralSystem::korteweg_de_vries(512, 2.0 * PI);
    let t_end = 1e-3;

    println!("two soliton KdV, N = 512, t = {t_end}");
    println!(
        "{:>8} {:>12} {:>12} {:>12} {:>12}",
        "n", "IFRK4 err", "IFRK4 s", "ETDRK4 err", "ETDRK4 s"
    );
    for n in (7..=14).map(|k| 1usize << k) {
        let (if_error, if_time) = soliton_run(&Ifrk4Solver {}, &system, t_end, n)?;
        let (etd_error, etd_time) = soliton_run(&Etdrk4Solver {}, &system, t_end, n)?;
        println!(
            "{n:>8} {if_error:>12.3e} {:>12.4} {etd_error:>12.3e} {:>12.4}",
            if_time.as_secs_f64(),
            etd_time.as_secs_f64(),
        );
    }
    Ok(())
}

fn print_profiles(config: &SimulationConfig, profiles: &[Array1<f64>], stride: usize) {
    println!("{:>12} {:>12} {:>12}", "t", "min u", "max u");
    for (t, u) in config.output_times().iter().zip(profiles).step_by(stride) {
        let min = u.iter().fold(f64::INFINITY, |acc, &u| acc.min(u));
        let max = u.iter().fold(f64::NEG_INFINITY, |acc, &u| acc.max(u));
        println!("{t:>12.4e} {min:>12.4} {max:>12.4}");
    }
}

/// Two solitons of `KdV` passing through each other
fn korteweg_de_vries_demo(method: Method) -> Result<(), SolverError> {
    let system = SpectralSystem::korteweg_de_vries(256, 2.0 * PI);
    let initial = system.grid().mapv(|x| {
        let (a, b) = (ALPHA[0], ALPHA[1]);
        3.0 * (a / (0.5 * a * (x - 1.0)).cosh()).powi(2)
            + 3.0 * (b / (0.5 * b * (x - 2.0)).cosh()).powi(2)
    });
    let config = SimulationConfig {
        t_start: 0.0,
        t_end: 6e-3,
        n: 1024,
        n_step: 8,
        method,
    };

    println!("KdV collision, {config:?}");
    let profiles = config.solve(
        &system.to_spectral(&initial)?,
        &system,
        &PhysicalMeasurement { system: &system },
    )?;
    print_profiles(&config, &profiles, 16);
    Ok(())
}

/// Spatio-temporal chaos in the Kuramoto-Sivashinsky equation
fn kuramoto_sivashinsky_demo(method: Method) -> Result<(), SolverError> {
    let system = SpectralSystem::kuramoto_sivashinsky(256, 32.0 * PI);
    let initial = system
        .grid()
        .mapv(|x| (x / 16.0).cos() * (1.0 + (x / 16.0).sin()));
    let config = SimulationConfig {
        t_start: 0.0,
        t_end: 150.0,
        n: 1024,
        n_step: 8,
        method,
    };

    println!("Kuramoto-Sivashinsky, {config:?}");
    let profiles = config.solve(
        &system.to_spectral(&initial)?,
        &system,
        &PhysicalMeasurement { system: &system },
    )?;
    print_profiles(&config, &profiles, 16);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let method = match std::env::args().nth(1) {
        Some(name) => name.parse()?,
        None => Method::Etdrk4,
    };

    soliton_comparison()?;
    println!();
    korteweg_de_vries_demo(method)?;
    println!();
    kuramoto_sivashinsky_demo(method)?;
    Ok(())
}
