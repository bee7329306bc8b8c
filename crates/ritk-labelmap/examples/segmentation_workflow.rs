//! Segmentation Workflow Example
//!
//! Builds an object map for a small synthetic abdomen volume:
//!
//! 1. Paint organs from a thresholded source volume
//! 2. Declare an entry before any pixels exist for it
//! 3. Delete an entry and watch the labels renumber
//! 4. Extract one organ into its own map
//! 5. Embed the entry table and recover it from the label image
//!
//! Usage:
//!   cargo run --example segmentation_workflow

use burn_ndarray::NdArray;
use ritk_core::image::{ImageGeometry, LabelImage};
use ritk_core::spatial::{Direction3, Point3, Spacing3};
use ritk_labelmap::{ObjectMap, Rgb};

type Backend = NdArray<f32>;

const SHAPE: [usize; 3] = [8, 16, 16];

fn main() -> anyhow::Result<()> {
    println!("RITK Object Map Example");
    println!("=======================\n");

    tracing_subscriber::fmt()
        .with_env_filter("debug")
        .init();

    let device = Default::default();
    let geometry = ImageGeometry::new(
        Point3::new(-120.0, -120.0, 40.0),
        Spacing3::new(0.8, 0.8, 2.5),
        Direction3::identity(),
    );

    // Synthetic source: 1 = liver on the left half, 2 = kidney in one corner
    let mut values = vec![0i64; SHAPE.iter().product()];
    for (offset, index) in ritk_core::image::Coordinates::new(SHAPE).enumerate() {
        if index[2] < 8 {
            values[offset] = 1;
        }
        if index[1] >= 12 && index[2] >= 12 {
            values[offset] = 2;
        }
    }
    let source = LabelImage::<Backend, 3>::from_labels(values, SHAPE, geometry, &device)?;

    println!("Step 1: Painting organs...");
    let mut map = ObjectMap::<Backend, 3>::new(SHAPE, geometry, &device);
    map.add_entry_from_image_pixel(&source, Some(1), "liver", Rgb::new(180, 60, 40))?;
    map.add_entry_from_image_pixel(&source, None, "kidney", Rgb::new(220, 180, 60))?;
    println!("  Entries: {:?}", map.entries().names());

    println!("Step 2: Declaring a lesion entry...");
    map.add_entry("lesion")?;
    println!("  Objects: {}", map.number_of_objects());

    println!("Step 3: Deleting the liver...");
    map.delete_entry("liver")?;
    println!("  Entries: {:?}", map.entries().names());
    println!("  Kidney is now label {:?}", map.find_entry("kidney"));

    println!("Step 4: Extracting the kidney...");
    let kidney_label = map.find_entry("kidney").unwrap_or_default();
    let kidney = map.pick_one_entry(kidney_label)?;
    let voxels = kidney.image().labels().iter().filter(|&&v| v == 1).count();
    println!("  Kidney voxels: {}", voxels);

    let rgb = map.to_rgb_image()?;
    println!("  Corner color: {:?}", rgb.pixel([0, 15, 15])?);

    println!("Step 5: Round-tripping through metadata...");
    let image = map.into_label_image()?;
    let restored = ObjectMap::from_image(image)?;
    println!("  Restored entries: {:?}", restored.entries().names());

    Ok(())
}
