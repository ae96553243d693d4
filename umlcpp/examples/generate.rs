//! Generates C++ headers for a model.
//!
//! Run with: `cargo run --example generate -- [model.xml] [out_dir]`
//!
//! Without a model file a small built-in vehicle model is used.

use std::path::PathBuf;
use umlcpp::prelude::*;

fn demo_model() -> Result<Model, ModelError> {
    let mut model = Model::new("Vehicles");
    let root = model.root();
    let parts = model.add_package(root, "Parts")?;
    let cars = model.add_package(root, "Cars")?;

    let engine = model.add_class(
        parts,
        "Engine",
        Classifier {
            attributes: vec![Attribute {
                visibility: Visibility::Private,
                ..Attribute::new("horsepower", "int")
            }],
            operations: vec![Operation {
                visibility: Visibility::Public,
                ..Operation::new("start")
            }],
            ..Classifier::default()
        },
    )?;

    let drivable = model.add_interface(
        root,
        "Drivable",
        Classifier {
            operations: vec![Operation {
                visibility: Visibility::Public,
                parameters: vec![Parameter::input("speed", "double")],
                ..Operation::new("drive")
            }],
            ..Classifier::default()
        },
    )?;

    let color = model.add_enumeration(
        cars,
        "Color",
        Classifier {
            literals: vec!["Red".into(), "Green".into(), "Blue".into()],
            ..Classifier::default()
        },
    )?;

    let car = model.add_class(
        cars,
        "Car",
        Classifier {
            is_leaf: true,
            documentation: "A road vehicle.".to_string(),
            attributes: vec![
                Attribute {
                    visibility: Visibility::Public,
                    ..Attribute::new("color", color)
                },
                Attribute {
                    multiplicity: "4".to_string(),
                    ..Attribute::new("wheelPressure", "double")
                },
            ],
            ..Classifier::default()
        },
    )?;

    model.add_realization(car, drivable, Visibility::Public)?;
    let mut end = AssociationEnd::navigable(engine, "engines");
    end.multiplicity = "1..*".to_string();
    end.visibility = Visibility::Private;
    model.add_association(AssociationEnd::new(car), end)?;

    Ok(model)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let model_path = args.next().map(PathBuf::from);
    let out_dir = args.next().map_or_else(|| PathBuf::from("generated"), PathBuf::from);

    let model = match &model_path {
        Some(path) => parse_model_file(path)?,
        None => demo_model()?,
    };
    tracing::info!(
        "Loaded model '{}' with {} elements",
        model.name_of(model.root()),
        model.len()
    );

    let options = GeneratorOptions::new().indent(Indent::Spaces(4));
    let report = generate_model(&model, &out_dir, &options).await?;

    println!(
        "umlcpp {}: {} headers, {} directories ({} reused), {} skipped -> {}",
        umlcpp::codegen::VERSION,
        report.headers_written,
        report.directories_created,
        report.directories_reused,
        report.skipped,
        out_dir.display()
    );
    Ok(())
}
