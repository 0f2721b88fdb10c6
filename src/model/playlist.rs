// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The playlist tree.
//!
//! Every piece of media is an input, and inputs are shown by items. The tree
//! keeps two parallel representations below the root:
//!
//! * the **category** tree, where added directories become nodes, and
//! * the **one-level** (flat) tree, holding only leaves.
//!
//! Each representation has a "Playlist" node and, when enabled, a "Media
//! library" node. These four nodes are well known and cannot be deleted.

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    rc::Rc,
};

use log::debug;
use rand::{rng, seq::SliceRandom};
use thiserror::Error;

use crate::model::{AddTarget, InputId, ItemId, MediaInfo};

/// Shared handle to the playlist, used only from the UI thread.
pub(crate) type PlaylistHandle = Rc<RefCell<Playlist>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum PlaylistError {
    #[error("no playlist item with id {0}")]
    UnknownItem(ItemId),

    #[error("playlist item {0} has no preferred node")]
    NoPreferredNode(ItemId),

    #[error("playlist item {0} cannot be modified")]
    Protected(ItemId),

    #[error("the media library is disabled")]
    NoMediaLibrary,

    #[error("cannot move playlist item {0} there")]
    InvalidMove(ItemId),
}

#[derive(Debug, Clone)]
pub(crate) struct PlaylistItem {
    pub(crate) id: ItemId,
    pub(crate) input: InputId,
    pub(crate) parent: Option<ItemId>,
    children: Option<Vec<ItemId>>,
}

impl PlaylistItem {
    pub(crate) fn is_node(&self) -> bool {
        self.children.is_some()
    }
}

/// The ids of the nodes an add operation may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WellKnownRoots {
    pub(crate) local_category: ItemId,
    pub(crate) local_onelevel: ItemId,
    pub(crate) ml_category: Option<ItemId>,
    pub(crate) ml_onelevel: Option<ItemId>,
}

impl WellKnownRoots {
    /// Returns the add target a root id corresponds to, if any.
    pub(crate) fn add_target(&self, root: ItemId) -> Option<AddTarget> {
        if root == self.local_category || root == self.local_onelevel {
            Some(AddTarget::Playlist)
        } else if Some(root) == self.ml_category || Some(root) == self.ml_onelevel {
            Some(AddTarget::MediaLibrary)
        } else {
            None
        }
    }
}

pub(crate) struct Playlist {
    items: HashMap<ItemId, PlaylistItem>,
    inputs: HashMap<InputId, MediaInfo>,
    next_item: u32,
    next_input: u32,

    root: ItemId,
    root_category: ItemId,
    root_onelevel: ItemId,
    roots: WellKnownRoots,

    prefer_tree: bool,

    current: Option<ItemId>,
    random: bool,
    repeat: bool,
    loop_all: bool,
}

impl Playlist {
    pub(crate) fn new(media_library: bool, prefer_tree: bool) -> Self {
        let mut playlist = Self {
            items: HashMap::new(),
            inputs: HashMap::new(),
            next_item: 0,
            next_input: 0,
            root: ItemId(0),
            root_category: ItemId(0),
            root_onelevel: ItemId(0),
            roots: WellKnownRoots {
                local_category: ItemId(0),
                local_onelevel: ItemId(0),
                ml_category: None,
                ml_onelevel: None,
            },
            prefer_tree,
            current: None,
            random: false,
            repeat: false,
            loop_all: false,
        };

        let root_input = playlist.new_input(MediaInfo::named("root"));
        playlist.root = playlist.insert_item(root_input, None, true);

        let category_input = playlist.new_input(MediaInfo::named("category"));
        playlist.root_category = playlist.insert_item(category_input, Some(playlist.root), true);
        let onelevel_input = playlist.new_input(MediaInfo::named("onelevel"));
        playlist.root_onelevel = playlist.insert_item(onelevel_input, Some(playlist.root), true);

        let local_input = playlist.new_input(MediaInfo::named("Playlist"));
        playlist.roots.local_category =
            playlist.insert_item(local_input, Some(playlist.root_category), true);
        playlist.roots.local_onelevel =
            playlist.insert_item(local_input, Some(playlist.root_onelevel), true);

        if media_library {
            let ml_input = playlist.new_input(MediaInfo::named("Media library"));
            playlist.roots.ml_category =
                Some(playlist.insert_item(ml_input, Some(playlist.root_category), true));
            playlist.roots.ml_onelevel =
                Some(playlist.insert_item(ml_input, Some(playlist.root_onelevel), true));
        }

        playlist
    }

    pub(crate) fn into_handle(self) -> PlaylistHandle {
        Rc::new(RefCell::new(self))
    }

    pub(crate) fn roots(&self) -> WellKnownRoots {
        self.roots
    }

    pub(crate) fn item(&self, id: ItemId) -> Option<&PlaylistItem> {
        self.items.get(&id)
    }

    pub(crate) fn media(&self, id: ItemId) -> Option<&MediaInfo> {
        self.items.get(&id).and_then(|item| self.inputs.get(&item.input))
    }

    pub(crate) fn children(&self, id: ItemId) -> &[ItemId] {
        self.items
            .get(&id)
            .and_then(|item| item.children.as_deref())
            .unwrap_or_default()
    }

    pub(crate) fn is_node(&self, id: ItemId) -> bool {
        self.items.get(&id).is_some_and(PlaylistItem::is_node)
    }

    /// One-based position of an item among its siblings.
    pub(crate) fn position(&self, id: ItemId) -> Option<usize> {
        let parent = self.items.get(&id)?.parent?;
        self.children(parent).iter().position(|c| *c == id).map(|p| p + 1)
    }

    fn is_protected(&self, id: ItemId) -> bool {
        id == self.root
            || id == self.root_category
            || id == self.root_onelevel
            || id == self.roots.local_category
            || id == self.roots.local_onelevel
            || Some(id) == self.roots.ml_category
            || Some(id) == self.roots.ml_onelevel
    }

    /// Resolves an item to the node that should be displayed for it.
    ///
    /// Top-level nodes exist twice, once in the category tree and once in the
    /// flat tree; the representation matching the tree preference wins, and
    /// the item itself is used when it has no counterpart. Nested nodes
    /// resolve to themselves. Leaves have no preferred node.
    pub(crate) fn preferred_node(&self, id: ItemId) -> Result<ItemId, PlaylistError> {
        let item = self.items.get(&id).ok_or(PlaylistError::UnknownItem(id))?;
        if !item.is_node() {
            return Err(PlaylistError::NoPreferredNode(id));
        }

        let counterpart_root = match item.parent {
            Some(parent) if parent == self.root_category && !self.prefer_tree => {
                Some(self.root_onelevel)
            }
            Some(parent) if parent == self.root_onelevel && self.prefer_tree => {
                Some(self.root_category)
            }
            _ => None,
        };

        let counterpart = counterpart_root.and_then(|root| {
            self.children(root)
                .iter()
                .copied()
                .find(|c| self.items.get(c).is_some_and(|i| i.input == item.input))
        });

        Ok(counterpart.unwrap_or(id))
    }

    fn target_nodes(&self, target: AddTarget) -> Result<(ItemId, ItemId), PlaylistError> {
        match target {
            AddTarget::Playlist => Ok((self.roots.local_category, self.roots.local_onelevel)),
            AddTarget::MediaLibrary => self
                .roots
                .ml_category
                .zip(self.roots.ml_onelevel)
                .ok_or(PlaylistError::NoMediaLibrary),
        }
    }

    /// Adds a single media item, returning the id of its tree representation.
    pub(crate) fn add_media(
        &mut self,
        target: AddTarget,
        media: MediaInfo,
    ) -> Result<ItemId, PlaylistError> {
        let (category, onelevel) = self.target_nodes(target)?;
        let input = self.new_input(media);
        let id = self.insert_item(input, Some(category), false);
        self.insert_item(input, Some(onelevel), false);
        Ok(id)
    }

    /// Adds a directory as a named node in the tree representation, with its
    /// media flattened into the one-level representation.
    pub(crate) fn add_directory(
        &mut self,
        target: AddTarget,
        name: &str,
        media: Vec<MediaInfo>,
    ) -> Result<ItemId, PlaylistError> {
        let (category, onelevel) = self.target_nodes(target)?;
        let node_input = self.new_input(MediaInfo::named(name));
        let node = self.insert_item(node_input, Some(category), true);

        for info in media {
            let input = self.new_input(info);
            self.insert_item(input, Some(node), false);
            self.insert_item(input, Some(onelevel), false);
        }

        Ok(node)
    }

    /// Copies an item, and for a node its leaves, into the media library.
    pub(crate) fn copy_to_media_library(&mut self, id: ItemId) -> Result<ItemId, PlaylistError> {
        let item = self.items.get(&id).ok_or(PlaylistError::UnknownItem(id))?;
        let media = self.inputs.get(&item.input).cloned().unwrap_or_default();

        if item.is_node() {
            let leaves = self
                .leaves_under(id)
                .into_iter()
                .filter_map(|leaf| self.media(leaf).cloned())
                .collect();
            self.add_directory(AddTarget::MediaLibrary, &media.display_title(), leaves)
        } else {
            self.add_media(AddTarget::MediaLibrary, media)
        }
    }

    /// Deletes an item together with every other item showing the same
    /// media, in either representation. Returns the ids of all removed items.
    pub(crate) fn delete(&mut self, id: ItemId) -> Result<Vec<ItemId>, PlaylistError> {
        if !self.items.contains_key(&id) {
            return Err(PlaylistError::UnknownItem(id));
        }
        if self.is_protected(id) {
            return Err(PlaylistError::Protected(id));
        }

        let inputs: HashSet<InputId> = self
            .subtree(id)
            .into_iter()
            .filter_map(|i| self.items.get(&i).map(|item| item.input))
            .collect();

        let doomed: Vec<ItemId> = self
            .items
            .values()
            .filter(|item| inputs.contains(&item.input))
            .map(|item| item.id)
            .collect();

        let mut removed = Vec::new();
        for item in doomed {
            if self.items.contains_key(&item) {
                removed.extend(self.detach(item));
            }
        }

        for input in inputs {
            self.inputs.remove(&input);
        }

        if self.current.is_some_and(|c| !self.items.contains_key(&c)) {
            self.current = None;
        }

        removed.sort();
        debug!("Deleted playlist item {} ({} items removed)", id, removed.len());
        Ok(removed)
    }

    /// Moves items next to, or into, `target`. A node target receives the
    /// items as its last children; a leaf target gets them inserted before
    /// it. Items must stay below the same top-level node.
    pub(crate) fn move_items(&mut self, ids: &[ItemId], target: ItemId) -> Result<(), PlaylistError> {
        let target_item = self.items.get(&target).ok_or(PlaylistError::UnknownItem(target))?;
        let target_is_node = target_item.is_node();
        let target_parent = target_item.parent;

        for &id in ids {
            if !self.items.contains_key(&id) {
                return Err(PlaylistError::UnknownItem(id));
            }
            if self.is_protected(id) {
                return Err(PlaylistError::Protected(id));
            }
            if id == target
                || self.subtree(id).contains(&target)
                || self.top_level(id) != self.top_level(target)
            {
                return Err(PlaylistError::InvalidMove(id));
            }
        }

        for &id in ids {
            let Some(old_parent) = self.items.get(&id).and_then(|item| item.parent) else {
                continue;
            };
            if let Some(children) = self.children_mut(old_parent) {
                children.retain(|c| *c != id);
            }

            let new_parent = if target_is_node {
                target
            } else {
                target_parent.ok_or(PlaylistError::InvalidMove(id))?
            };

            let Some(children) = self.children_mut(new_parent) else {
                return Err(PlaylistError::InvalidMove(id));
            };
            let index = if target_is_node {
                children.len()
            } else {
                children.iter().position(|c| *c == target).unwrap_or(children.len())
            };
            children.insert(index, id);

            if let Some(item) = self.items.get_mut(&id) {
                item.parent = Some(new_parent);
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> Option<ItemId> {
        self.current
    }

    pub(crate) fn set_current(&mut self, id: ItemId) {
        if self.items.contains_key(&id) {
            self.current = Some(id);
        }
    }

    /// True when `id` shows the media currently playing, whichever
    /// representation is playing.
    pub(crate) fn is_current(&self, id: ItemId) -> bool {
        let Some(current) = self.current.and_then(|c| self.items.get(&c)) else {
            return false;
        };
        self.items.get(&id).is_some_and(|item| item.input == current.input)
    }

    pub(crate) fn random(&self) -> bool {
        self.random
    }

    pub(crate) fn set_random(&mut self, random: bool) {
        self.random = random;
    }

    pub(crate) fn repeat(&self) -> bool {
        self.repeat
    }

    pub(crate) fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    pub(crate) fn loop_all(&self) -> bool {
        self.loop_all
    }

    pub(crate) fn set_loop(&mut self, loop_all: bool) {
        self.loop_all = loop_all;
    }

    /// Moves to the next item to play according to the repeat, loop and
    /// random flags, returning the new current item.
    pub(crate) fn advance(&mut self) -> Option<ItemId> {
        let scope = self
            .current
            .and_then(|c| self.top_level(c))
            .unwrap_or(self.roots.local_onelevel);
        let leaves = self.leaves_under(scope);

        let next = match self.current {
            _ if leaves.is_empty() => None,
            Some(current) if self.repeat => Some(current),
            current if self.random => {
                let mut candidates: Vec<ItemId> =
                    leaves.iter().copied().filter(|l| Some(*l) != current).collect();
                candidates.shuffle(&mut rng());
                candidates
                    .first()
                    .copied()
                    .or(current.filter(|_| self.loop_all))
            }
            None => leaves.first().copied(),
            Some(current) => match leaves.iter().position(|l| *l == current) {
                Some(pos) if pos + 1 < leaves.len() => Some(leaves[pos + 1]),
                _ if self.loop_all => leaves.first().copied(),
                _ => None,
            },
        };

        if let Some(next) = next {
            self.current = Some(next);
        }
        next
    }

    /// All leaves below a node in depth-first order.
    pub(crate) fn leaves_under(&self, id: ItemId) -> Vec<ItemId> {
        self.subtree(id)
            .into_iter()
            .filter(|i| !self.is_node(*i))
            .collect()
    }

    /// The well-known node (direct child of the category or one-level root)
    /// an item lives under.
    pub(crate) fn top_level(&self, id: ItemId) -> Option<ItemId> {
        let mut cursor = id;
        loop {
            let parent = self.items.get(&cursor)?.parent?;
            if parent == self.root_category || parent == self.root_onelevel {
                return Some(cursor);
            }
            cursor = parent;
        }
    }

    /// The item and all its descendants, depth-first.
    fn subtree(&self, id: ItemId) -> Vec<ItemId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if !self.items.contains_key(&next) {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    fn children_mut(&mut self, id: ItemId) -> Option<&mut Vec<ItemId>> {
        self.items.get_mut(&id).and_then(|item| item.children.as_mut())
    }

    /// Unlinks an item from its parent and drops its subtree.
    fn detach(&mut self, id: ItemId) -> Vec<ItemId> {
        let subtree = self.subtree(id);
        if let Some(parent) = self.items.get(&id).and_then(|item| item.parent) {
            if let Some(children) = self.children_mut(parent) {
                children.retain(|c| *c != id);
            }
        }
        for item in &subtree {
            self.items.remove(item);
        }
        subtree
    }

    fn new_input(&mut self, media: MediaInfo) -> InputId {
        self.next_input += 1;
        let id = InputId(self.next_input);
        self.inputs.insert(id, media);
        id
    }

    fn insert_item(&mut self, input: InputId, parent: Option<ItemId>, node: bool) -> ItemId {
        self.next_item += 1;
        let id = ItemId(self.next_item);
        self.items.insert(
            id,
            PlaylistItem {
                id,
                input,
                parent,
                children: node.then(Vec::new),
            },
        );
        if let Some(children) = parent.and_then(|p| self.children_mut(p)) {
            children.push(id);
        }
        id
    }
}
