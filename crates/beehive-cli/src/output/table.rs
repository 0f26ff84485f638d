use beehive_core::canvas::CanvasIndex;
use beehive_core::model::{Field, FieldRecord};
use beehive_core::parsing::classify::Layout;

pub fn print_record(record: &FieldRecord, layout: Layout) {
    let layout_name = match layout {
        Layout::Structured => "structured",
        Layout::Unstructured => "unstructured",
    };
    println!("Layout: {layout_name}");
    println!("Line:   {}\n", record.line);

    if record.fields.is_empty() {
        println!("  (no fields)");
        return;
    }

    let width = Field::ALL
        .iter()
        .filter(|f| record.contains(**f))
        .map(|f| f.as_str().len())
        .max()
        .unwrap_or(8);

    for field in Field::ALL {
        for (i, value) in record.values(field).iter().enumerate() {
            let label = if i == 0 { field.as_str() } else { "" };
            println!("  {:<width$}  {}", label, value, width = width);
        }
    }
}

pub fn print_canvases(index: &CanvasIndex) {
    if index.is_empty() {
        println!("No canvases found.");
        return;
    }

    let volume_width = index
        .iter()
        .map(|m| m.volume().len())
        .max()
        .unwrap_or(0)
        .max("Volume".len());
    let image_width = index
        .iter()
        .map(|m| m.image_number().len())
        .max()
        .unwrap_or(0)
        .max("Image".len());

    println!(
        "  {:<vw$}  {:<iw$}  Canvas",
        "Volume",
        "Image",
        vw = volume_width,
        iw = image_width
    );
    println!("  {}", "-".repeat(volume_width + image_width + 12));

    for meta in index.iter() {
        println!(
            "  {:<vw$}  {:<iw$}  {}",
            meta.volume(),
            meta.image_number(),
            meta.canvas,
            vw = volume_width,
            iw = image_width
        );
    }

    println!("\n{} canvas(es)", index.len());
}
