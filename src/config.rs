//! Scene configuration and the two stock board setups.
use crate::finder::{FinderOptions, Heuristic};
use crate::layout::BoardLayout;
use crate::visualizer::{Color, PathStyle, VisualizerOptions};

/// Which clicks take part in tile selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClickTrigger {
    Plain,
    /// Only clicks with the modifier (ctrl) key held select tiles.
    Modifier,
}

impl ClickTrigger {
    pub fn accepts(&self, ctrl_key: bool) -> bool {
        match self {
            ClickTrigger::Plain => true,
            ClickTrigger::Modifier => ctrl_key,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SceneConfig {
    pub layout: BoardLayout,
    pub trigger: ClickTrigger,
    pub finder: FinderOptions,
    pub visualizer: VisualizerOptions,
    /// Highlight tiles within the visualizer's `highlight_range` of the start tile as soon
    /// as it is picked.
    pub range_highlight_on_start: bool,
}

impl Default for SceneConfig {
    fn default() -> SceneConfig {
        SceneConfig::arc_path()
    }
}

impl SceneConfig {
    /// Ctrl-click selection, 4-directional movement, red spheres sitting in the tiles with a
    /// line just above them.
    pub fn ground_path() -> SceneConfig {
        SceneConfig {
            layout: BoardLayout::default(),
            trigger: ClickTrigger::Modifier,
            finder: FinderOptions::default(),
            visualizer: VisualizerOptions {
                style: PathStyle::Polyline,
                sphere_radius: 0.51,
                marker_height: 0.5,
                line_lift: 0.5,
                near_color: Color::RED,
                far_color: Color::RED,
                line_color: Color::RED,
                ..VisualizerOptions::default()
            },
            range_highlight_on_start: false,
        }
    }

    /// Plain-click selection, diagonal movement without crossing corners, an arc between the
    /// endpoints plus range-colored spheres along the path.
    pub fn arc_path() -> SceneConfig {
        SceneConfig {
            layout: BoardLayout::default(),
            trigger: ClickTrigger::Plain,
            finder: FinderOptions::new(true, true)
                .with_heuristic(Heuristic::Custom(|dx, dy| dx + dy)),
            visualizer: VisualizerOptions::default(),
            range_highlight_on_start: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_grid::DiagonalMovement;

    #[test]
    fn presets() {
        let ground = SceneConfig::ground_path();
        assert_eq!(ground.finder.diagonal_movement(), DiagonalMovement::Never);
        assert!(!ground.trigger.accepts(false));
        assert!(ground.trigger.accepts(true));

        let arc = SceneConfig::default();
        assert_eq!(
            arc.finder.diagonal_movement(),
            DiagonalMovement::OnlyWhenNoObstacles
        );
        assert!(arc.trigger.accepts(false));
        assert_eq!(arc.visualizer.style, PathStyle::Combined);
        assert_eq!(arc.finder.heuristic.estimate(2, 3), 5 * crate::C);
    }
}
