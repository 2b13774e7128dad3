// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry groups produced by floor plan extraction.

use std::fmt;

/// How a group lays out its vertex and face resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupLayout {
    /// instances → segments → points, one polygon list shared by every segment
    Segmented,
    /// one point list and one polygon list per instance
    Instanced,
    /// a single point list with its polygon(s)
    Single,
}

/// A named set of meshes read from one `<stem>_verts.txt` / `<stem>_faces.txt` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    WallVertical,
    WallHorizontal,
    WindowVertical,
    WindowHorizontal,
    DoorVertical,
    DoorHorizontal,
    Floor,
    Room,
}

impl GroupKind {
    /// Every group, in export order.
    pub const ALL: [GroupKind; 8] = [
        GroupKind::WallVertical,
        GroupKind::WallHorizontal,
        GroupKind::WindowVertical,
        GroupKind::WindowHorizontal,
        GroupKind::DoorVertical,
        GroupKind::DoorHorizontal,
        GroupKind::Floor,
        GroupKind::Room,
    ];

    /// File stem of the group's resources.
    pub fn stem(self) -> &'static str {
        match self {
            GroupKind::WallVertical => "wall_vertical",
            GroupKind::WallHorizontal => "wall_horizontal",
            GroupKind::WindowVertical => "window_vertical",
            GroupKind::WindowHorizontal => "window_horizontal",
            GroupKind::DoorVertical => "door_vertical",
            GroupKind::DoorHorizontal => "door_horizontal",
            GroupKind::Floor => "floor",
            GroupKind::Room => "room",
        }
    }

    pub fn verts_file(self) -> String {
        format!("{}_verts.txt", self.stem())
    }

    pub fn faces_file(self) -> String {
        format!("{}_faces.txt", self.stem())
    }

    pub fn layout(self) -> GroupLayout {
        match self {
            GroupKind::WallVertical | GroupKind::WindowVertical | GroupKind::DoorVertical => {
                GroupLayout::Segmented
            }
            GroupKind::WallHorizontal
            | GroupKind::WindowHorizontal
            | GroupKind::DoorHorizontal
            | GroupKind::Room => GroupLayout::Instanced,
            GroupKind::Floor => GroupLayout::Single,
        }
    }

    /// Node name prefix; instance and segment numbers are appended.
    pub fn name_prefix(self) -> &'static str {
        match self {
            GroupKind::WallVertical => "Wall",
            GroupKind::WallHorizontal => "WallTop",
            GroupKind::WindowVertical | GroupKind::WindowHorizontal => "Window",
            GroupKind::DoorVertical | GroupKind::DoorHorizontal => "Door",
            GroupKind::Floor => "Floor",
            GroupKind::Room => "Room",
        }
    }

    /// Window faces come out of extraction facing inwards.
    pub fn inverts_winding(self) -> bool {
        matches!(self, GroupKind::WindowVertical | GroupKind::WindowHorizontal)
    }

    /// Flat-color material shared by the group's family.
    pub fn material(self) -> (&'static str, [f32; 4]) {
        match self {
            GroupKind::WallVertical | GroupKind::WallHorizontal => ("Wall", [0.85, 0.85, 0.82, 1.0]),
            GroupKind::WindowVertical | GroupKind::WindowHorizontal => {
                ("Window", [0.55, 0.75, 0.9, 1.0])
            }
            GroupKind::DoorVertical | GroupKind::DoorHorizontal => ("Door", [0.55, 0.36, 0.2, 1.0]),
            GroupKind::Floor => ("Floor", [0.6, 0.6, 0.6, 1.0]),
            GroupKind::Room => ("Room", [0.92, 0.89, 0.8, 1.0]),
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}
