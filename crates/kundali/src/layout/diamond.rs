use crate::chart::{HouseMap, HouseNumber};
use crate::layout::template::DiamondTemplate;
use crate::rendering::primitives::{LabelRole, Point, Shape, TextAnchor};
use crate::rendering::spec::ChartSpec;
use crate::rendering::visual_config::LabelStyle;

/// Lay out a North-Indian diamond chart.
///
/// Geometry comes only from `template`; `houses` contributes label text.
/// Every house gets a number label and an occupant label, the latter empty
/// when nobody occupies the house.
pub fn layout(houses: &HouseMap, template: &DiamondTemplate) -> ChartSpec {
    let palette = &template.palette;
    let mut spec = ChartSpec::new(template.width, template.height, template.name.clone());

    spec.shapes.push(Shape::Rect {
        rect: template.background(),
        fill: Some(palette.background),
        stroke: None,
    });
    spec.shapes.push(Shape::Rect {
        rect: template.frame,
        fill: None,
        stroke: Some(palette.border),
    });

    for (i, (from, to)) in template.construction_lines().into_iter().enumerate() {
        let stroke = if i < 2 { palette.diagonals } else { palette.diamond };
        spec.shapes.push(Shape::Line { from, to, stroke });
    }

    for house in HouseNumber::all() {
        let slot = template.slot(house);
        spec.shapes.push(text(
            house,
            LabelRole::HouseNumber,
            slot.number,
            house.to_string(),
            &palette.house_number,
        ));
        spec.shapes.push(text(
            house,
            LabelRole::Occupants,
            slot.occupants,
            houses.label(house, &template.retrograde_marker),
            &palette.occupants,
        ));
    }

    log::debug!(
        "laid out '{}' chart with {} shapes",
        template.name,
        spec.shapes.len()
    );
    spec
}

fn text(
    house: HouseNumber,
    role: LabelRole,
    position: Point,
    content: String,
    style: &LabelStyle,
) -> Shape {
    Shape::Text {
        position,
        content,
        size: style.size,
        color: style.color,
        weight: style.weight,
        anchor: TextAnchor::Middle,
        house,
        role,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::HouseOccupant;

    #[test]
    fn test_paint_order() {
        let spec = layout(&HouseMap::new(), &DiamondTemplate::card());
        assert!(matches!(spec.shapes[0], Shape::Rect { fill: Some(_), .. }));
        assert!(matches!(spec.shapes[1], Shape::Rect { fill: None, stroke: Some(_), .. }));
        assert!(spec.shapes[2..8].iter().all(|s| matches!(s, Shape::Line { .. })));
        assert_eq!(spec.shapes.len(), 2 + 6 + 24);
    }

    #[test]
    fn test_custom_retrograde_marker() {
        let mut map = HouseMap::new();
        map.push(HouseNumber::new(9), HouseOccupant::new("Saturn").retrograde(true));
        let template = DiamondTemplate::standalone().with_retrograde_marker("*");
        let spec = layout(&map, &template);
        let label = spec.label(HouseNumber::new(9), LabelRole::Occupants).unwrap();
        assert_eq!(label.content, "Sa*");
    }
}
