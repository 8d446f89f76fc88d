//! Command-line interface for lens_planner
//!
//! Basic CLI tool for evaluating a camera configuration from a JSON file.

use lens_planner::{evaluate, Evaluation, OpticalConfig};
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut json_output = false;
    let mut config_path_arg = None;

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => json_output = true,
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if config_path_arg.is_none() {
                    config_path_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple config paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path_arg {
        Some(path) => match OpticalConfig::from_json_file(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: Could not load {}: {}", path, err);
                process::exit(1);
            }
        },
        None => OpticalConfig::default_indoor(),
    };

    let results = match evaluate(&config) {
        Ok(results) => results,
        Err(err) => {
            eprintln!("Error: {}", err.user_message());
            process::exit(1);
        }
    };

    if json_output {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("Error: Could not serialize results: {}", err);
                process::exit(1);
            }
        }
    } else {
        print_report(&results);
    }
}

fn print_report(results: &Evaluation) {
    println!("Sensor");
    println!("  resolution:   {} x {} px", results.sensor.h_res, results.sensor.v_res);
    println!(
        "  dimensions:   {:.2} x {:.2} mm ({:.2} µm pixels)",
        results.sensor.width_mm, results.sensor.height_mm, results.sensor.pixel_size_um
    );
    println!(
        "  format:       {} ({:.2} mm diagonal)",
        results.format.label, results.format.diagonal_mm
    );

    if let Some(fov) = &results.fov {
        println!("Field of view");
        println!("  focal length: {:.2} mm", fov.focal_length_mm);
        println!("  horizontal:   {:.2}°", fov.hfov_deg);
        println!("  diagonal:     {:.2}°", fov.dfov_deg);
    }

    if let Some(wd) = &results.working_distance {
        println!("Working distance");
        println!("  distance:     {:.1} cm", wd.distance_cm);
        println!("  linear HFOV:  {:.1} cm", wd.hfov_cm);
        println!("  per pixel:    {:.4} cm", wd.cm_per_pixel());
    }

    if let Some(coverage) = &results.coverage {
        println!("Face coverage");
        println!(
            "  18 cm face:   {:.0} px ({:.1}% of the 80 px target)",
            coverage.pixels_for_face, coverage.occupancy_percent
        );
        println!(
            "  80 px needs:  {:.1} cm distance ({:.1} cm FOV)",
            coverage.reference.distance_cm, coverage.reference.hfov_cm
        );
    }

    if let Some(dof) = &results.depth_of_field {
        println!("Depth of field");
        println!(
            "  blur circle:  {:.4} mm (airy {:.2} µm)",
            dof.coc_mm, dof.airy_disk_um
        );
        println!("  hyperfocal:   {:.1} mm", dof.hyperfocal_mm);
        println!("  near:         {:.1} mm", dof.near_mm);
        println!("  far:          {}", dof.far);
        println!("  total:        {}", dof.depth);
    }

    if let Some(verdict) = &results.compliance {
        println!("Compliance");
        println!(
            "  range {:.0}-{:.0} cm covered: {}",
            verdict.near_limit_cm, verdict.far_limit_cm, verdict.covers_required_range
        );
        println!(
            "  {:.1} px at test distance (needs {:.0}): {}",
            verdict.px_at_test_distance, verdict.required_pixels, verdict.meets_pixel_density
        );
    }

    if let Some(outcome) = &results.adjustments {
        println!("Adjustments ({} feasible)", outcome.candidates.len());
        println!(
            "  keep aperture: f/{} at {} mm",
            outcome.closest_aperture.f_number, outcome.closest_aperture.focal_length_mm
        );
        println!(
            "  keep lens:     f/{} at {} mm",
            outcome.closest_focal.f_number, outcome.closest_focal.focal_length_mm
        );
    }

    for problem in &results.problems {
        println!("Problem ({}): {}", problem.stage, problem.message);
    }
}

fn print_help(program: &str) {
    println!("Usage: {} [OPTIONS] [CONFIG.json]", program);
    println!();
    println!("Evaluate a camera/lens configuration for face recognition.");
    println!("Without a config file, a representative indoor setup is used.");
    println!();
    println!("Options:");
    println!("  --json       Print the full evaluation as JSON");
    println!("  -h, --help   Show this help message");
}
