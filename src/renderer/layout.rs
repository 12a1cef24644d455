use crate::models::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    UpdatedAt,
    SensorName,
    SensorValue,
    Annotation,
}

/// Measures where drawn text ends vertically.
pub trait TextMeasure {
    /// Bottom edge of the bounding box of `text` drawn at y = 0 in the font of `role`.
    fn text_bottom(&self, role: TextRole, text: &str) -> i32;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedText {
    pub role: TextRole,
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Single-column layout of a snapshot.
///
/// The "Updated at" line is anchored to the bottom margin. Readings flow down
/// from the top-left margin; each line starts at the measured bottom of the
/// line above it. Nothing is wrapped or clipped, and readings that run into
/// the timestamp or past the canvas bottom are left as they are.
pub fn layout_snapshot<M: TextMeasure>(
    snapshot: &Snapshot,
    canvas_height: u32,
    margin: (i32, i32),
    measure: &M,
) -> Vec<PlacedText> {
    let (x, top) = margin;
    let mut placed = Vec::with_capacity(1 + snapshot.readings.len() * 3);

    let updated_at = snapshot.updated_at_display();
    let updated_at_y =
        canvas_height as i32 - margin.1 - measure.text_bottom(TextRole::UpdatedAt, &updated_at);
    placed.push(PlacedText {
        role: TextRole::UpdatedAt,
        text: updated_at,
        x,
        y: updated_at_y,
    });

    let mut y = top;
    let mut push_line = |role: TextRole, text: String| {
        let bottom = y + measure.text_bottom(role, &text);
        placed.push(PlacedText { role, text, x, y });
        // Never move the cursor upwards, whatever the font reports.
        y = bottom.max(y);
    };

    for reading in &snapshot.readings {
        push_line(TextRole::SensorName, reading.name.clone());
        push_line(TextRole::SensorValue, reading.formatted_value());
        if let Some(extra) = &reading.extra {
            push_line(TextRole::Annotation, extra.clone());
        }
    }

    placed
}
