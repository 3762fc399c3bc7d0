//! # Edit-Mesh Alignment
//!
//! Flattens or recentres a vertex selection along one axis of the object,
//! the world or the 3D cursor.
//!
//! ## Spaces
//!
//! Coordinates are read and written in the requested orientation:
//!
//! - **Local**: object space, no conversion
//! - **World**: `object * p`
//! - **Cursor**: `cursor⁻¹ * object * p`
//!
//! Results are always mapped back into object space before they are stored.

use crate::error::{AlignError, AlignResult};
use crate::selection::{bounding_box_and_center, center_between};
use crate::view::{right_and_up_axes, ViewAxes, Viewport};
use edit_mesh::{Mesh, Transform, VertexId};
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index of the axis.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Axis for a component index, `None` above 2.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }
}

/// Target value an alignment moves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlignType {
    /// Smallest coordinate of the selection
    Min,
    /// Largest coordinate of the selection
    Max,
    /// Min or max picked by screen direction
    #[default]
    MinMax,
    /// The orientation's origin
    Zero,
    /// Mean coordinate of the selection
    Average,
    /// The 3D cursor
    Cursor,
}

/// Screen direction used in view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlignDirection {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
    Horizontal,
    Vertical,
}

impl AlignDirection {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Horizontal)
    }
}

/// Space in which coordinates are compared and set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Local,
    World,
    Cursor,
}

/// How the axis is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlignMode {
    /// Resolved from the viewport and the direction
    View,
    /// Taken from the request's axis
    #[default]
    Axes,
}

/// Parameters of [`align_vertices`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignRequest {
    pub kind: AlignType,
    pub axis: Axis,
    pub direction: AlignDirection,
    pub orientation: Orientation,
    pub mode: AlignMode,
}

/// Parameters of [`center_vertices`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CenterRequest {
    pub axis: Axis,
    pub direction: AlignDirection,
    pub orientation: Orientation,
    pub mode: AlignMode,
}

/// Scene state the operators read.
#[derive(Debug, Clone, Copy)]
pub struct AlignContext<'a> {
    /// Object owning the mesh
    pub object: &'a Transform,
    /// 3D cursor; only its location is used as an alignment target
    pub cursor: &'a Transform,
    pub viewport: &'a Viewport,
}

impl AlignContext<'_> {
    /// Orientation matrix used to resolve view axes.
    fn orientation_matrix(&self, orientation: Orientation) -> DMat4 {
        match orientation {
            Orientation::Local => self.object.matrix(),
            Orientation::World => DMat4::IDENTITY,
            Orientation::Cursor => self.cursor.matrix(),
        }
    }

    /// Object-space point in `orientation` space.
    fn to_space(&self, orientation: Orientation, p: DVec3) -> DVec3 {
        match orientation {
            Orientation::Local => p,
            Orientation::World => self.object.transform_point(p),
            Orientation::Cursor => self
                .cursor
                .inverse_transform_point(self.object.transform_point(p)),
        }
    }

    /// Point in `orientation` space back in object space.
    fn from_space(&self, orientation: Orientation, p: DVec3) -> DVec3 {
        match orientation {
            Orientation::Local => p,
            Orientation::World => self.object.inverse_transform_point(p),
            Orientation::Cursor => self
                .object
                .inverse_transform_point(self.cursor.transform_point(p)),
        }
    }

    /// Offset in `orientation` space as an object-space offset.
    fn offset_from_space(&self, orientation: Orientation, offset: DVec3) -> DVec3 {
        match orientation {
            Orientation::Local => offset,
            Orientation::World => self.object.inverse_transform_vector(offset),
            Orientation::Cursor => self
                .object
                .inverse_transform_vector(self.cursor.transform_vector(offset)),
        }
    }

    fn view_axes(&self, orientation: Orientation) -> ViewAxes {
        right_and_up_axes(self.viewport, &self.orientation_matrix(orientation))
    }
}

/// Moves every vertex of `verts` onto a common coordinate along one axis.
///
/// Returns the target coordinate, expressed in the requested orientation.
///
/// In view mode min/max picks the axis from the screen direction and
/// honours flipped axes, so "right" always means the right side of the
/// screen. In axes mode `MinMax` treats right and top as max.
pub fn align_vertices(
    mesh: &mut Mesh,
    verts: &[VertexId],
    request: &AlignRequest,
    context: &AlignContext<'_>,
) -> AlignResult<f64> {
    if verts.is_empty() {
        return Err(AlignError::empty("align"));
    }
    let orientation = request.orientation;

    let mut axis = request.axis.index();
    let mut flip = (false, false);
    if request.mode == AlignMode::View {
        let axes = context.view_axes(orientation);
        flip = (axes.flip_right, axes.flip_up);
        match request.kind {
            AlignType::MinMax | AlignType::Zero | AlignType::Average | AlignType::Cursor => {
                axis = if request.direction.is_horizontal() {
                    axes.right
                } else {
                    axes.up
                };
            }
            AlignType::Min | AlignType::Max => {}
        }
    }

    let coords: Vec<DVec3> = mesh
        .positions(verts)?
        .into_iter()
        .map(|p| context.to_space(orientation, p))
        .collect();
    let values = coords.iter().map(|c| c[axis]);
    let min = values.clone().fold(f64::INFINITY, f64::min);
    let max = values.clone().fold(f64::NEG_INFINITY, f64::max);

    let target = match request.kind {
        AlignType::Min => min,
        AlignType::Max => max,
        AlignType::MinMax => {
            let flipped = if request.direction.is_horizontal() {
                flip.0
            } else {
                flip.1
            };
            let towards_max = matches!(
                request.direction,
                AlignDirection::Right | AlignDirection::Top
            );
            if towards_max != flipped {
                max
            } else {
                min
            }
        }
        AlignType::Zero => 0.0,
        AlignType::Average => values.sum::<f64>() / coords.len() as f64,
        AlignType::Cursor => match orientation {
            Orientation::Local => {
                context
                    .object
                    .inverse_transform_point(context.cursor.translation())[axis]
            }
            Orientation::World => context.cursor.translation()[axis],
            Orientation::Cursor => 0.0,
        },
    };

    let updates: Vec<(VertexId, DVec3)> = verts
        .iter()
        .zip(coords)
        .map(|(&v, mut c)| {
            c[axis] = target;
            (v, context.from_space(orientation, c))
        })
        .collect();
    mesh.set_positions(&updates)?;
    mesh.normal_update();

    log::debug!(
        "align {:?} on axis {} of {} vertices to {}",
        request.kind,
        axis,
        verts.len(),
        target
    );
    Ok(target)
}

/// Translates `verts` so their origin sits at zero on one axis.
///
/// The origin is the vertex itself for one vertex, the midpoint for two and
/// the bounding box centre otherwise. Returns the applied object-space
/// offset.
pub fn center_vertices(
    mesh: &mut Mesh,
    verts: &[VertexId],
    request: &CenterRequest,
    context: &AlignContext<'_>,
) -> AlignResult<DVec3> {
    let positions = mesh.positions(verts)?;
    let origin = match positions.as_slice() {
        [] => return Err(AlignError::empty("center")),
        [single] => *single,
        [a, b] => center_between(*a, *b, 0.5),
        many => bounding_box_and_center(many)?.center,
    };

    let orientation = request.orientation;
    let axis = match request.mode {
        AlignMode::View => {
            let axes = context.view_axes(orientation);
            if request.direction.is_horizontal() {
                axes.right
            } else {
                axes.up
            }
        }
        AlignMode::Axes => request.axis.index(),
    };

    let origin = context.to_space(orientation, origin);
    let mut offset = DVec3::ZERO;
    offset[axis] = -origin[axis];
    let offset = context.offset_from_space(orientation, offset);

    mesh.translate(verts, offset)?;
    Ok(offset)
}
