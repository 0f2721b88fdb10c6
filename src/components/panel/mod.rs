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

//! The playlist panel.
//!
//! A [`PlaylistPanel`] shows a [`TreeView`] over a [`PlaylistModel`] together
//! with a toolbar of add, random, repeat, go-to-playing, filter and clear
//! controls. It mediates between user input and the model: interactions are
//! forwarded to the model, and model state (the playing item, the random and
//! repeat flags, the shown columns) is reflected back into the toolbar faces
//! and menus.
//!
//! The only lasting state the panel keeps is the identifier of the root node
//! currently shown, which decides whether media can be added and where to.
//! Everything else is transient widget state.
//!
//! Popup menus are modal: while one is open it receives every input event,
//! and the action chosen from it is applied when it closes.

mod buttons;
mod event;
mod render;

use std::time::Instant;

use anyhow::Result;
use log::{debug, info};
use ratatui::layout::{Position, Rect};
use tui_input::Input;

use crate::{
    components::{PopupMenu, TreeView},
    dialogs::{DialogKind, DialogProvider, DialogRequest},
    model::{
        AddTarget, Column, ItemId, SortOrder,
        playlist::{PlaylistError, PlaylistHandle},
        tree_model::{ContextAction, ModelIndex, PlaylistModel},
    },
};

pub(crate) use buttons::{ButtonFace, RandomState, RepeatState};
use buttons::{ADD_MENU, CLEAR_FACE, GOTO_FACE, ToolbarButton, add_face};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PanelFocus {
    Tree,
    Search,
}

/// The open popup menu, if any.
enum PanelMenu {
    Add(PopupMenu<DialogKind>),
    Columns(PopupMenu<Column>),
    Context(PopupMenu<ContextAction>),
}

#[derive(Debug, Default)]
struct PanelLayout {
    tree: Rect,
    toolbar: Vec<(ToolbarButton, Rect)>,
}

impl PanelLayout {
    fn button_at(&self, position: Position) -> Option<ToolbarButton> {
        self.toolbar
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|(button, _)| *button)
    }

    fn button_area(&self, button: ToolbarButton) -> Option<Rect> {
        self.toolbar.iter().find(|(b, _)| *b == button).map(|(_, area)| *area)
    }
}

pub(crate) struct PlaylistPanel<M, D> {
    model: M,
    playlist: PlaylistHandle,
    dialogs: D,

    current_root_id: Option<ItemId>,

    random: RandomState,
    repeat: RepeatState,

    tree: TreeView,
    search: Input,
    focus: PanelFocus,
    menu: Option<PanelMenu>,

    layout: PanelLayout,
    hovered: Option<ToolbarButton>,
    drag_from: Option<usize>,
    last_click: Option<(usize, Instant)>,
}

impl<M: PlaylistModel, D: DialogProvider> PlaylistPanel<M, D> {
    pub(crate) fn new(playlist: PlaylistHandle, model: M, dialogs: D) -> Self {
        let random = RandomState::from_flag(model.has_random());
        let repeat = RepeatState::from_flags(model.has_repeat(), model.has_loop());

        let mut tree = TreeView::new();
        tree.sync(model.rows());

        Self {
            model,
            playlist,
            dialogs,
            current_root_id: None,
            random,
            repeat,
            tree,
            search: Input::default(),
            focus: PanelFocus::Tree,
            menu: None,
            layout: PanelLayout::default(),
            hovered: None,
            drag_from: None,
            last_click: None,
        }
    }

    pub(crate) fn model(&self) -> &M {
        &self.model
    }

    pub(crate) fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub(crate) fn focus(&self) -> PanelFocus {
        self.focus
    }

    /// Returns keyboard focus from the filter box to the tree.
    pub(crate) fn focus_tree(&mut self) {
        self.focus = PanelFocus::Tree;
    }

    pub(crate) fn has_menu(&self) -> bool {
        self.menu.is_some()
    }

    #[cfg(test)]
    pub(crate) fn current_root_id(&self) -> Option<ItemId> {
        self.current_root_id
    }

    /// Notification that the root shown by the panel changed, which decides
    /// whether, and where, the add button adds media.
    pub(crate) fn root_changed(&mut self, id: ItemId) {
        self.current_root_id = Some(id);
        debug!("Root changed to {}, add target {:?}", id, self.add_target());
    }

    /// Only the well-known playlist and media library nodes take new media.
    pub(crate) fn add_target(&self) -> Option<AddTarget> {
        let root = self.current_root_id?;
        self.playlist.borrow().roots().add_target(root)
    }

    pub(crate) fn is_add_enabled(&self) -> bool {
        self.add_target().is_some()
    }

    pub(crate) fn add_face(&self) -> ButtonFace {
        add_face(self.add_target())
    }

    #[cfg(test)]
    pub(crate) fn random_state(&self) -> RandomState {
        self.random
    }

    #[cfg(test)]
    pub(crate) fn repeat_state(&self) -> RepeatState {
        self.repeat
    }

    /// Tooltip of the toolbar button under the mouse.
    pub(crate) fn hovered_tooltip(&self) -> Option<&'static str> {
        self.hovered.map(|button| self.face(button).tooltip)
    }

    fn face(&self, button: ToolbarButton) -> ButtonFace {
        match button {
            ToolbarButton::Add => self.add_face(),
            ToolbarButton::Random => self.random.face(),
            ToolbarButton::Repeat => self.repeat.face(),
            ToolbarButton::Goto => GOTO_FACE,
            ToolbarButton::Filter => ButtonFace { icon: "/", tooltip: "Filter" },
            ToolbarButton::Clear => CLEAR_FACE,
        }
    }

    pub(crate) fn toggle_random(&mut self) {
        let state = self.random.toggled();
        self.model.set_random(state.flag());
        self.random = state;
        info!("Random {}", if state.flag() { "on" } else { "off" });
    }

    pub(crate) fn toggle_repeat(&mut self) {
        let state = self.repeat.next();
        let (repeat, loop_all) = state.flags();
        self.model.set_repeat(repeat);
        self.model.set_loop(loop_all);
        self.repeat = state;
        info!("Repeat mode is now {:?}", state);
    }

    pub(crate) fn goto_playing_item(&mut self) {
        match self.model.current_index() {
            Some(index) => self.tree.scroll_to(index.row),
            None => debug!("Nothing is playing"),
        }
    }

    /// Keeps the playing row in view when its data changes.
    pub(crate) fn handle_data_changed(&mut self, index: ModelIndex) {
        if self.model.is_current(index) {
            self.tree.scroll_to(index.row);
        }
    }

    /// Applies the model's pending data changes and re-syncs the tree with
    /// the model's rows.
    pub(crate) fn process_model_changes(&mut self) {
        for index in self.model.take_data_changes() {
            self.handle_data_changed(index);
        }
        self.tree.sync(self.model.rows());
    }

    pub(crate) fn popup_add(&mut self) {
        if !self.is_add_enabled() {
            return;
        }

        let position = self
            .layout
            .button_area(ToolbarButton::Add)
            .map_or(Position::ORIGIN, |area| area.as_position());

        let menu = ADD_MENU
            .iter()
            .fold(PopupMenu::new(position), |menu, (label, kind)| {
                menu.with_entry(*label, *kind)
            });
        self.menu = Some(PanelMenu::Add(menu));
    }

    pub(crate) fn popup_select_column(&mut self, point: Position) {
        let shown = self.model.shown_columns();
        let menu = Column::ALL
            .iter()
            .fold(PopupMenu::new(point), |menu, column| {
                menu.with_checkable(column.title(), *column, shown.contains(*column))
            });
        self.menu = Some(PanelMenu::Columns(menu));
    }

    /// Opens the model's context menu for `index` at `point`.
    pub(crate) fn do_popup(&mut self, index: Option<ModelIndex>, point: Position) {
        let Some(index) = index else {
            return;
        };
        let selection = self.tree.selected_indices(self.model.rows());
        let menu = self.model.popup(index, point, &selection);
        if !menu.is_empty() {
            self.menu = Some(PanelMenu::Context(menu));
        }
    }

    pub(crate) fn filter_text(&self) -> &str {
        self.search.value()
    }

    pub(crate) fn set_filter_text(&mut self, text: &str) {
        self.search = Input::new(text.to_string());
        self.apply_filter();
    }

    pub(crate) fn clear_filter(&mut self) {
        self.search.reset();
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        self.model.search(self.search.value());
        self.tree.sync(self.model.rows());
    }

    pub(crate) fn delete_selection(&mut self) {
        let selection = self.tree.selected_indices(self.model.rows());
        info!("Deleting {} playlist items", selection.len());
        self.model.delete(&selection);
        self.tree.sync(self.model.rows());
    }

    /// Shows the node `id` resolves to. Fails, leaving the view untouched,
    /// when `id` is unknown or has no node to show.
    pub(crate) fn set_root(&mut self, id: ItemId) -> Result<ItemId, PlaylistError> {
        let node = self.playlist.borrow().preferred_node(id)?;
        self.model.rebuild(node);
        self.tree.set_cursor(None);
        self.tree.sync(self.model.rows());
        Ok(node)
    }

    pub(crate) fn remove_item(&mut self, id: ItemId) {
        self.model.remove_item(id);
        self.tree.sync(self.model.rows());
    }

    /// Sorts by `column`, toggling the order when already sorted by it.
    pub(crate) fn sort_by(&mut self, column: Column) {
        let order = match self.model.sort_state() {
            Some((sorted, order)) if sorted == column => order.toggled(),
            _ => SortOrder::Ascending,
        };
        debug!("Sorting by {:?} {:?}", column, order);
        self.model.sort(column, order);
        self.tree.sync(self.model.rows());
    }

    fn open_dialog(&self, kind: DialogKind) -> Result<()> {
        let Some(target) = self.add_target() else {
            return Ok(());
        };
        self.dialogs.open(DialogRequest { kind, target })
    }

    fn activate_row(&mut self, row: usize) {
        if let Some(index) = self.model.index(row) {
            self.model.activate(index);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::{
        components::MenuOutcome,
        model::{
            ColumnSet,
            playlist::Playlist,
            tree_model::{RowKind, ViewRow},
        },
        theme::Theme,
    };

    /// A model that records what the panel forwards to it.
    #[derive(Default)]
    pub(crate) struct RecordingModel {
        pub(crate) rows: Vec<ViewRow>,
        pub(crate) random: bool,
        pub(crate) repeat: bool,
        pub(crate) loop_all: bool,
        pub(crate) shown: ColumnSet,
        pub(crate) sort: Option<(Column, SortOrder)>,
        pub(crate) current: Option<usize>,
        pub(crate) changes: Vec<ModelIndex>,

        pub(crate) activated: Vec<ModelIndex>,
        pub(crate) searches: Vec<String>,
        pub(crate) deleted: Vec<Vec<ModelIndex>>,
        pub(crate) rebuilt: Vec<ItemId>,
        pub(crate) removed: Vec<ItemId>,
        pub(crate) toggled: Vec<Column>,
        pub(crate) dropped: Vec<(Vec<ModelIndex>, ModelIndex)>,
        pub(crate) nexts: usize,
    }

    impl RecordingModel {
        pub(crate) fn with_leaves(n: u32) -> Self {
            Self {
                rows: (0..n)
                    .map(|i| ViewRow { id: ItemId(100 + i), depth: 0, kind: RowKind::Leaf })
                    .collect(),
                shown: [Column::Title, Column::Duration].into_iter().collect(),
                ..Self::default()
            }
        }
    }

    impl PlaylistModel for RecordingModel {
        fn root(&self) -> ItemId {
            self.rebuilt.last().copied().unwrap_or(ItemId(0))
        }

        fn rows(&self) -> &[ViewRow] {
            &self.rows
        }

        fn data(&self, index: ModelIndex, column: Column) -> String {
            format!("{} {}", column.title(), index.id)
        }

        fn current_index(&self) -> Option<ModelIndex> {
            self.current.and_then(|row| self.index(row))
        }

        fn is_current(&self, index: ModelIndex) -> bool {
            self.current == Some(index.row)
        }

        fn activate(&mut self, index: ModelIndex) {
            self.activated.push(index);
        }

        fn activate_next(&mut self) {
            self.nexts += 1;
        }

        fn search(&mut self, text: &str) {
            self.searches.push(text.to_string());
        }

        fn has_random(&self) -> bool {
            self.random
        }

        fn set_random(&mut self, random: bool) {
            self.random = random;
        }

        fn has_repeat(&self) -> bool {
            self.repeat
        }

        fn set_repeat(&mut self, repeat: bool) {
            self.repeat = repeat;
        }

        fn has_loop(&self) -> bool {
            self.loop_all
        }

        fn set_loop(&mut self, loop_all: bool) {
            self.loop_all = loop_all;
        }

        fn shown_columns(&self) -> ColumnSet {
            self.shown
        }

        fn toggle_column(&mut self, column: Column) {
            self.toggled.push(column);
            self.shown.toggle(column);
        }

        fn sort(&mut self, column: Column, order: SortOrder) {
            self.sort = Some((column, order));
        }

        fn sort_state(&self) -> Option<(Column, SortOrder)> {
            self.sort
        }

        fn set_expanded(&mut self, _index: ModelIndex, _expanded: bool) {}

        fn rebuild(&mut self, root: ItemId) {
            self.rebuilt.push(root);
        }

        fn remove_item(&mut self, id: ItemId) {
            self.removed.push(id);
        }

        fn delete(&mut self, indices: &[ModelIndex]) {
            self.deleted.push(indices.to_vec());
        }

        fn drop_items(&mut self, items: &[ModelIndex], target: ModelIndex) {
            self.dropped.push((items.to_vec(), target));
        }

        fn popup(
            &self,
            index: ModelIndex,
            point: Position,
            _selection: &[ModelIndex],
        ) -> PopupMenu<ContextAction> {
            PopupMenu::new(point).with_entry("Play", ContextAction::Play(index))
        }

        fn run_context_action(&mut self, action: ContextAction) {
            if let ContextAction::Play(index) = action {
                self.activate(index);
            }
        }

        fn take_data_changes(&mut self) -> Vec<ModelIndex> {
            std::mem::take(&mut self.changes)
        }
    }

    #[derive(Clone, Default)]
    pub(crate) struct RecordingDialogs {
        pub(crate) requests: Rc<RefCell<Vec<DialogRequest>>>,
    }

    impl DialogProvider for RecordingDialogs {
        fn open(&self, request: DialogRequest) -> Result<()> {
            self.requests.borrow_mut().push(request);
            Ok(())
        }
    }

    type TestPanel = PlaylistPanel<RecordingModel, RecordingDialogs>;

    fn panel_with(model: RecordingModel) -> (TestPanel, RecordingDialogs, PlaylistHandle) {
        let playlist = Playlist::new(true, true).into_handle();
        let dialogs = RecordingDialogs::default();
        let panel = PlaylistPanel::new(playlist.clone(), model, dialogs.clone());
        (panel, dialogs, playlist)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE })
    }

    fn draw(panel: &mut TestPanel) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let area = f.area();
                panel.draw(f, area, &theme);
            })
            .unwrap();
        terminal
    }

    #[test]
    fn initial_toggle_state_comes_from_model() {
        let model = RecordingModel { repeat: true, loop_all: true, random: true, ..RecordingModel::default() };
        let (panel, _, _) = panel_with(model);
        assert_eq!(panel.repeat_state(), RepeatState::RepeatOne);
        assert_eq!(panel.random_state(), RandomState::On);

        let model = RecordingModel { loop_all: true, ..RecordingModel::default() };
        let (panel, _, _) = panel_with(model);
        assert_eq!(panel.repeat_state(), RepeatState::LoopAll);
        assert_eq!(panel.random_state(), RandomState::Off);
    }

    #[test]
    fn repeat_toggle_cycles_and_sets_model_flags() {
        let (mut panel, _, _) = panel_with(RecordingModel::default());
        assert_eq!(panel.repeat_state(), RepeatState::Off);

        let expected = [
            (RepeatState::RepeatOne, true, false, "Repeat one"),
            (RepeatState::LoopAll, false, true, "Repeat all"),
            (RepeatState::Off, false, false, "No repeat"),
            (RepeatState::RepeatOne, true, false, "Repeat one"),
        ];
        for (state, repeat, loop_all, tooltip) in expected {
            panel.toggle_repeat();
            assert_eq!(panel.repeat_state(), state);
            assert_eq!(panel.model().repeat, repeat);
            assert_eq!(panel.model().loop_all, loop_all);
            assert_eq!(panel.repeat_state().face().tooltip, tooltip);
        }
    }

    #[test]
    fn random_toggle_alternates() {
        let (mut panel, _, _) = panel_with(RecordingModel::default());
        for i in 0..4 {
            panel.toggle_random();
            let on = i % 2 == 0;
            assert_eq!(panel.model().random, on);
            assert_eq!(panel.random_state().face().tooltip, if on { "Random" } else { "No random" });
        }
    }

    #[test]
    fn add_button_follows_root() {
        let (mut panel, _, playlist) = panel_with(RecordingModel::default());
        let roots = playlist.borrow().roots();
        assert!(!panel.is_add_enabled());
        assert_eq!(panel.current_root_id(), None);

        panel.root_changed(ItemId(4242));
        assert!(!panel.is_add_enabled());

        for root in [roots.local_category, roots.local_onelevel] {
            panel.root_changed(root);
            assert_eq!(panel.add_target(), Some(AddTarget::Playlist));
            assert_eq!(panel.add_face().tooltip, "Add to playlist");
        }

        for root in [roots.ml_category, roots.ml_onelevel].into_iter().flatten() {
            panel.root_changed(root);
            assert_eq!(panel.add_target(), Some(AddTarget::MediaLibrary));
            assert_eq!(panel.add_face().tooltip, "Add to media library");
        }
    }

    #[test]
    fn add_menu_requests_dialog_for_target() {
        let (mut panel, dialogs, playlist) = panel_with(RecordingModel::default());

        // Disabled: nothing opens
        panel.process_event(&key(KeyCode::Char('a'))).unwrap();
        assert!(!panel.has_menu());

        let ml = playlist.borrow().roots().ml_category.unwrap();
        panel.root_changed(ml);
        panel.process_event(&key(KeyCode::Char('a'))).unwrap();
        assert!(panel.has_menu());

        panel.process_event(&key(KeyCode::Down)).unwrap();
        panel.process_event(&key(KeyCode::Down)).unwrap();
        panel.process_event(&key(KeyCode::Enter)).unwrap();

        assert!(!panel.has_menu());
        assert_eq!(
            *dialogs.requests.borrow(),
            vec![DialogRequest { kind: DialogKind::AppendDirectory, target: AddTarget::MediaLibrary }]
        );
    }

    #[test]
    fn search_text_is_forwarded_verbatim() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(2));
        panel.process_event(&key(KeyCode::Char('/'))).unwrap();
        assert_eq!(panel.focus(), PanelFocus::Search);

        panel.process_event(&key(KeyCode::Char('A'))).unwrap();
        panel.process_event(&key(KeyCode::Char('b'))).unwrap();
        panel.process_event(&key(KeyCode::Esc)).unwrap();

        assert_eq!(panel.focus(), PanelFocus::Tree);
        assert_eq!(panel.model().searches, vec!["A", "Ab"]);
        assert_eq!(panel.filter_text(), "Ab");
    }

    #[test]
    fn clear_forwards_empty_filter() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(2));
        panel.set_filter_text("abc");
        panel.clear_filter();

        assert_eq!(panel.filter_text(), "");
        assert_eq!(panel.model().searches, vec!["abc", ""]);
    }

    #[test]
    fn column_menu_reflects_shown_columns() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(1));
        panel.popup_select_column(Position::new(2, 2));

        let Some(PanelMenu::Columns(menu)) = &panel.menu else {
            panic!("column menu not open");
        };
        let checked: Vec<(Column, Option<bool>)> =
            menu.entries().iter().map(|e| (e.action, e.checked)).collect();
        let expected: Vec<(Column, Option<bool>)> = Column::ALL
            .iter()
            .map(|c| (*c, Some(matches!(c, Column::Title | Column::Duration))))
            .collect();
        assert_eq!(checked, expected);

        // Third entry is the duration column
        panel.process_event(&key(KeyCode::Down)).unwrap();
        panel.process_event(&key(KeyCode::Down)).unwrap();
        panel.process_event(&key(KeyCode::Enter)).unwrap();
        assert_eq!(panel.model().toggled, vec![Column::Duration]);
        assert!(!panel.model().shown.contains(Column::Duration));
    }

    #[test]
    fn delete_with_empty_selection_forwards_empty_list() {
        let (mut panel, _, _) = panel_with(RecordingModel::default());
        panel.delete_selection();
        assert_eq!(panel.model().deleted, vec![vec![]]);
    }

    #[test]
    fn delete_key_without_selection_forwards_empty_list() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(3));
        assert_eq!(panel.tree.cursor(), Some(0));

        panel.process_event(&key(KeyCode::Delete)).unwrap();
        panel.process_event(&key(KeyCode::Backspace)).unwrap();
        assert_eq!(panel.model().deleted, vec![vec![], vec![]]);
    }

    #[test]
    fn delete_key_forwards_clicked_row() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(3));
        draw(&mut panel);

        panel.process_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 3)).unwrap();
        panel.process_event(&key(KeyCode::Delete)).unwrap();
        assert_eq!(panel.model().deleted, vec![vec![ModelIndex { row: 1, id: ItemId(101) }]]);
    }

    #[test]
    fn delete_key_forwards_marked_rows() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(3));
        panel.process_event(&key(KeyCode::Char(' '))).unwrap();
        panel.process_event(&key(KeyCode::Char(' '))).unwrap();
        panel.process_event(&key(KeyCode::Delete)).unwrap();

        assert_eq!(
            panel.model().deleted,
            vec![vec![
                ModelIndex { row: 0, id: ItemId(100) },
                ModelIndex { row: 1, id: ItemId(101) },
            ]]
        );
    }

    #[test]
    fn set_root_resolves_or_fails() {
        let (mut panel, _, playlist) = panel_with(RecordingModel::default());

        assert_eq!(panel.set_root(ItemId(4242)), Err(PlaylistError::UnknownItem(ItemId(4242))));
        assert!(panel.model().rebuilt.is_empty());

        let leaf = playlist
            .borrow_mut()
            .add_media(AddTarget::Playlist, crate::model::playlist::tests::track("x"))
            .unwrap();
        assert_eq!(panel.set_root(leaf), Err(PlaylistError::NoPreferredNode(leaf)));

        // Flat representation resolves to the tree one
        let roots = playlist.borrow().roots();
        assert_eq!(panel.set_root(roots.local_onelevel), Ok(roots.local_category));
        assert_eq!(panel.model().rebuilt, vec![roots.local_category]);
    }

    #[test]
    fn remove_item_is_forwarded() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(1));
        panel.remove_item(ItemId(100));
        assert_eq!(panel.model().removed, vec![ItemId(100)]);
    }

    #[test]
    fn data_change_of_playing_row_scrolls_to_it() {
        let mut model = RecordingModel::with_leaves(5);
        model.current = Some(3);
        model.changes = vec![ModelIndex { row: 1, id: ItemId(101) }, ModelIndex { row: 3, id: ItemId(103) }];
        let (mut panel, _, _) = panel_with(model);
        assert_eq!(panel.tree.cursor(), Some(0));

        panel.process_model_changes();
        assert_eq!(panel.tree.cursor(), Some(3));
    }

    #[test]
    fn goto_and_next_keys() {
        let mut model = RecordingModel::with_leaves(5);
        model.current = Some(4);
        let (mut panel, _, _) = panel_with(model);

        panel.process_event(&key(KeyCode::Char('o'))).unwrap();
        assert_eq!(panel.tree.cursor(), Some(4));

        panel.process_event(&key(KeyCode::Char('n'))).unwrap();
        assert_eq!(panel.model().nexts, 1);
    }

    #[test]
    fn header_click_sorts_and_toggles_order() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(3));
        draw(&mut panel);

        // Header row is the first line inside the border, title is the first
        // shown column after the marker
        panel.process_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 1)).unwrap();
        assert_eq!(panel.model().sort, Some((Column::Title, SortOrder::Ascending)));
        panel.process_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 1)).unwrap();
        assert_eq!(panel.model().sort, Some((Column::Title, SortOrder::Descending)));
    }

    #[test]
    fn double_click_activates_row() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(3));
        draw(&mut panel);

        let click = mouse(MouseEventKind::Down(MouseButton::Left), 10, 3);
        panel.process_event(&click).unwrap();
        assert_eq!(panel.tree.cursor(), Some(1));
        assert!(panel.model().activated.is_empty());

        panel.process_event(&click).unwrap();
        assert_eq!(panel.model().activated, vec![ModelIndex { row: 1, id: ItemId(101) }]);
    }

    #[test]
    fn right_clicks_open_menus() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(3));
        draw(&mut panel);

        panel.process_event(&mouse(MouseEventKind::Down(MouseButton::Right), 10, 1)).unwrap();
        assert!(matches!(panel.menu, Some(PanelMenu::Columns(_))));
        panel.process_event(&key(KeyCode::Esc)).unwrap();
        assert!(!panel.has_menu());

        panel.process_event(&mouse(MouseEventKind::Down(MouseButton::Right), 10, 4)).unwrap();
        let Some(PanelMenu::Context(menu)) = &mut panel.menu else {
            panic!("context menu not open");
        };
        assert_eq!(menu.position(), Position::new(10, 4));
        assert_eq!(
            menu.process_event(&key(KeyCode::Enter)),
            MenuOutcome::Triggered(ContextAction::Play(ModelIndex { row: 2, id: ItemId(102) }))
        );
    }

    #[test]
    fn context_menu_action_runs_on_model() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(2));
        panel.process_event(&key(KeyCode::Char('m'))).unwrap();
        assert!(panel.has_menu());

        panel.process_event(&key(KeyCode::Enter)).unwrap();
        assert!(!panel.has_menu());
        assert_eq!(panel.model().activated, vec![ModelIndex { row: 0, id: ItemId(100) }]);
    }

    #[test]
    fn drag_drops_selection_on_target_row() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(3));
        draw(&mut panel);

        panel.process_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 2)).unwrap();
        panel.process_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 10, 3)).unwrap();
        panel.process_event(&mouse(MouseEventKind::Up(MouseButton::Left), 10, 4)).unwrap();

        assert_eq!(
            panel.model().dropped,
            vec![(vec![ModelIndex { row: 0, id: ItemId(100) }], ModelIndex { row: 2, id: ItemId(102) })]
        );
    }

    #[test]
    fn dragging_unmarked_row_drops_only_that_row() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(4));
        draw(&mut panel);

        panel.process_event(&key(KeyCode::Char(' '))).unwrap();
        assert!(panel.tree.is_marked(ItemId(100)));

        panel.process_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 4)).unwrap();
        panel.process_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 10, 5)).unwrap();
        panel.process_event(&mouse(MouseEventKind::Up(MouseButton::Left), 10, 5)).unwrap();

        assert_eq!(
            panel.model().dropped,
            vec![(vec![ModelIndex { row: 2, id: ItemId(102) }], ModelIndex { row: 3, id: ItemId(103) })]
        );
        assert!(!panel.tree.is_marked(ItemId(100)));
    }

    #[test]
    fn dragging_marked_row_drops_all_marked_rows() {
        let (mut panel, _, _) = panel_with(RecordingModel::with_leaves(4));
        draw(&mut panel);

        panel.process_event(&key(KeyCode::Char(' '))).unwrap();
        panel.process_event(&key(KeyCode::Char(' '))).unwrap();

        panel.process_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 3)).unwrap();
        panel.process_event(&mouse(MouseEventKind::Up(MouseButton::Left), 10, 5)).unwrap();

        assert_eq!(
            panel.model().dropped,
            vec![(
                vec![ModelIndex { row: 0, id: ItemId(100) }, ModelIndex { row: 1, id: ItemId(101) }],
                ModelIndex { row: 3, id: ItemId(103) }
            )]
        );
    }

    #[test]
    fn hovering_toolbar_shows_tooltip() {
        let (mut panel, _, _) = panel_with(RecordingModel::default());
        draw(&mut panel);

        // Toolbar is the last line: add, random, repeat, goto
        panel.process_event(&mouse(MouseEventKind::Moved, 4, 11)).unwrap();
        assert_eq!(panel.hovered_tooltip(), Some("No random"));

        panel.process_event(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 11)).unwrap();
        assert_eq!(panel.random_state(), RandomState::On);
        assert_eq!(panel.hovered_tooltip(), Some("Random"));

        panel.process_event(&mouse(MouseEventKind::Moved, 30, 5)).unwrap();
        assert_eq!(panel.hovered_tooltip(), None);
    }
}
