use super::*;

/// Tab-separated dump of `field`, blank where unreached, followed by a line
/// with the field's origin and the hostile list.
pub fn draw_field_diag(field: &DistanceField, hostiles: &[Pos]) -> String {
    let mut text = String::new();
    for y in 0..field.height() {
        let row: Vec<String> = (0..field.width())
            .map(|x| match field.get(Pos { y: y as i32, x: x as i32 }) {
                0 => String::new(),
                value => value.to_string(),
            })
            .collect();
        text.push_str(&row.join("\t"));
        text.push('\n');
    }
    let hostiles: Vec<String> =
        hostiles.iter().map(|pos| format!("({},{})", pos.x, pos.y)).collect();
    text.push_str(&format!("{}; [{}]\n", field.origin(), hostiles.concat()));
    text
}
