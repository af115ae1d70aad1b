use bson::oid::ObjectId;
use landscape_core::Segment;
use serde::{Deserialize, Serialize};

// Inputs that, together with the seed, reproduce a layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub max_width: f64,
    pub max_height: f64,
    pub start_x: f64,
    pub start_y: f64,
    pub tile_size: f64,
    pub body_landscape_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ObjectId>,
    pub name: String,
    pub seed: i64,
    pub params: LayoutParams,
    // Ordered left to right, header first and footer last
    pub segments: Vec<Segment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use landscape_core::{AvailableSpace, Point, TileType, YDirection};

    #[test]
    fn layout_doc_to_bson() {
        let doc = LayoutDoc {
            id: None,
            name: "level-1".into(),
            seed: 7,
            params: LayoutParams {
                max_width: 1000.0,
                max_height: 600.0,
                start_x: 0.0,
                start_y: 0.0,
                tile_size: 25.0,
                body_landscape_count: 4,
            },
            segments: vec![Segment {
                tile_type: TileType::Wall,
                length: 450.0,
                y_direction: YDirection::Down,
                linked_landscape: "header".into(),
                end: Point::new(0.0, 450.0),
                space: AvailableSpace {
                    ahead: 1000.0,
                    up: 450.0,
                    down: 150.0,
                },
                to_baseline: 0.0,
            }],
        };

        let bson_doc = bson::to_document(&doc).unwrap();
        // no _id until MongoDB assigns one
        assert!(!bson_doc.contains_key("_id"));
        let seg = bson_doc.get_array("segments").unwrap()[0].as_document().unwrap();
        assert_eq!(seg.get_str("tile_type").unwrap(), "wall");
        assert_eq!(seg.get_str("y_direction").unwrap(), "down");

        let back: LayoutDoc = bson::from_document(bson_doc).unwrap();
        assert_eq!(back.segments, doc.segments);
        assert_eq!(back.params, doc.params);
    }
}
