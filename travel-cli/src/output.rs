//! Human-readable and JSON rendering for command results.

use anyhow::{Context, Result};
use serde::Serialize;
use travel_core::{Destination, ECO_TIPS, HealthAdvice, HealthReport, TripPlan, forecast_status};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")?;
    println!("{json}");
    Ok(())
}

pub fn destinations<'a>(dests: impl IntoIterator<Item = &'a Destination>, json: bool) -> Result<()> {
    let dests: Vec<&Destination> = dests.into_iter().collect();

    if json {
        return print_json(&dests);
    }

    if dests.is_empty() {
        println!("No destinations match.");
        return Ok(());
    }

    println!(
        "{:>3}  {:<12} {:<12} {:>4} {:>4}  {:<10} {:<6}",
        "ID", "NAME", "COUNTRY", "ECO", "AQI", "AIR", "POLLEN"
    );
    for d in dests {
        println!(
            "{:>3}  {:<12} {:<12} {:>4} {:>4}  {:<10} {:<6}",
            d.id,
            d.name,
            d.country,
            d.eco_score,
            d.air_quality.aqi,
            d.air_quality.status,
            d.pollen.level
        );
    }

    Ok(())
}

pub fn destination(d: &Destination, json: bool) -> Result<()> {
    if json {
        return print_json(d);
    }

    println!("{}, {}  [{}]", d.name, d.country, d.id);
    println!("{}", d.description);
    println!();
    println!("Location:     {}", d.coordinates);
    println!("Eco score:    {}/100", d.eco_score);
    println!("Air quality:  {} (AQI {})", d.air_quality.status, d.air_quality.aqi);
    println!("Pollen:       {} - {}", d.pollen.level, d.pollen.forecast);

    let options = &d.sustainable_options;
    for (label, items) in [
        ("Transportation", &options.transportation),
        ("Accommodation", &options.accommodation),
        ("Activities", &options.activities),
    ] {
        println!();
        println!("{label}:");
        for item in items {
            println!("  - {item}");
        }
    }

    let advice = HealthAdvice::for_destination(d);
    println!();
    println!("Health recommendations:");
    for (label, text) in [
        ("Best time to visit", &advice.best_time_to_visit),
        ("For allergy sufferers", &advice.allergy_sufferers),
        ("For respiratory conditions", &advice.respiratory_conditions),
    ] {
        println!("  {label}: {text}");
    }

    Ok(())
}

pub fn health(d: &Destination, report: &HealthReport, json: bool) -> Result<()> {
    if json {
        return print_json(report);
    }

    println!("Forecast for {}, {} ({})", d.name, d.country, d.coordinates);
    println!();
    println!("Air quality:");
    for day in &report.air_quality {
        println!("  {}  AQI {:>3}  {}", day.date, day.aqi, forecast_status(day.aqi));
    }
    println!();
    println!("Pollen:");
    for day in &report.pollen {
        println!("  {}  {}", day.date, day.level);
    }

    Ok(())
}

pub fn trip(plan: &TripPlan, json: bool) -> Result<()> {
    if json {
        return print_json(plan);
    }

    println!("Trip {} planned.", plan.id);
    println!("Destination:    {}", plan.destination_name);
    println!("Dates:          {} to {}", plan.start_date, plan.end_date);
    println!("Travelers:      {}", plan.travelers);
    println!("Transportation: {}", plan.transportation);
    println!("Accommodation:  {}", plan.accommodation);
    if plan.activities.is_empty() {
        println!("Activities:     none");
    } else {
        println!("Activities:     {}", plan.activities.join(", "));
    }

    Ok(())
}

pub fn tips() {
    for tip in &ECO_TIPS {
        println!("* {}", tip.title);
        println!("  {}", tip.description);
    }
}
