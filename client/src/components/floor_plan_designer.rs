//! Floor-plan designer dialog.
//!
//! ARCHITECTURE
//! ============
//! The `designer` crate owns shapes, gestures, rendering and SVG output.
//! This host attaches the engine to a `<canvas>`, forwards DOM events to it,
//! mirrors the toolbar state in a [`DesignerView`] signal, floats a
//! `<textarea>` over text boxes being edited, and on save uploads the
//! serialized markup and reports the stored document's URL.
//!
//! If the canvas has no 2D context the dialog still opens; the surface stays
//! empty and an inline message replaces the drawing area.

use leptos::prelude::*;

use crate::state::designer::DesignerView;
#[cfg(feature = "csr")]
use crate::util::designer_input::{map_modifiers, parse_grid_size, pointer_point, should_prevent_default_key};
use crate::util::designer_input::zoom_label;

#[cfg(feature = "csr")]
use designer::engine::{Action, Engine, EngineCore};
#[cfg(feature = "csr")]
use designer::input::{Button, Key};
use designer::input::Tool;
#[cfg(feature = "csr")]
use designer::overlay::{OverlayKey, overlay_key_action};
#[cfg(feature = "csr")]
use designer::surface::DrawingSurface;
#[cfg(feature = "csr")]
use rooms::recent::RecentFloorMaps;
#[cfg(feature = "csr")]
use rooms::{Session, WorkflowError};
#[cfg(feature = "csr")]
use std::cell::RefCell;
#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
type EngineCell = Rc<RefCell<Option<Engine>>>;

/// Run one engine operation and refresh the mirrored view.
#[cfg(feature = "csr")]
fn run(engine: &EngineCell, view: RwSignal<DesignerView>, op: impl FnOnce(&mut EngineCore) -> Vec<Action>) {
    let mut slot = engine.borrow_mut();
    let Some(engine) = slot.as_mut() else {
        return;
    };
    match engine.apply(op) {
        Ok(actions) => view.update(|v| {
            v.sync(&engine.core);
            v.apply(&actions);
        }),
        Err(err) => {
            log::error!("designer render failed: {err}");
            view.update(|v| v.surface_error = Some(err.to_string()));
        }
    }
}

/// Append a redraw to operations that only report a state change.
#[cfg(feature = "csr")]
fn redraw(mut actions: Vec<Action>) -> Vec<Action> {
    actions.push(Action::RenderNeeded);
    actions
}

/// Designer dialog. `on_saved` receives the uploaded document's absolute URL.
#[component]
pub fn FloorPlanDesigner(
    #[prop(default = designer::consts::DEFAULT_SURFACE_WIDTH)] width: f64,
    #[prop(default = designer::consts::DEFAULT_SURFACE_HEIGHT)] height: f64,
    #[prop(optional, into)] initial_title: String,
    on_cancel: Callback<()>,
    on_saved: Callback<String>,
) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let editor_ref = NodeRef::<leptos::html::Textarea>::new();
    let view_state = RwSignal::new(DesignerView::default());
    let title = RwSignal::new(initial_title);
    let grid_input = RwSignal::new(String::new());

    #[cfg(feature = "csr")]
    let session = expect_context::<RwSignal<Session>>();
    #[cfg(feature = "csr")]
    let recent = expect_context::<RwSignal<RecentFloorMaps>>();
    #[cfg(feature = "csr")]
    let engine: EngineCell = Rc::new(RefCell::new(None));

    #[cfg(feature = "csr")]
    {
        let engine = Rc::clone(&engine);
        Effect::new(move || {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if engine.borrow().is_some() {
                return;
            }
            match Engine::attach(canvas, width, height) {
                Ok(instance) => {
                    let mut view = DesignerView::from_core(&instance.core);
                    if let Err(err) = instance.render() {
                        view.surface_error = Some(err.to_string());
                    }
                    grid_input.set(view.grid_size.to_string());
                    view_state.set(view);
                    *engine.borrow_mut() = Some(instance);
                }
                Err(err) => {
                    log::warn!("designer canvas unavailable: {err}");
                    view_state.update(|v| v.surface_error = Some(WorkflowError::SurfaceUnavailable.to_string()));
                }
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (width, height);
    }

    // Focus the floating editor when it opens.
    #[cfg(feature = "csr")]
    Effect::new(move || {
        if view_state.with(|v| v.editing.is_some())
            && let Some(editor) = editor_ref.get()
        {
            crate::util::browser::focus(&editor);
        }
    });

    let set_tool = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |tool: Tool| {
                run(&engine, view_state, |core| {
                    core.set_tool(tool);
                    Vec::new()
                });
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_tool: Tool| {}
        }
    };

    // Toolbar commands share one dispatcher.
    #[derive(Clone, Copy)]
    enum Command {
        AddRect,
        AddText,
        Delete,
        ZoomIn,
        ZoomOut,
        ResetZoom,
        ToggleGrid,
    }

    let command = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |cmd: Command| {
                run(&engine, view_state, |core| match cmd {
                    Command::AddRect => core.add_rect(),
                    Command::AddText => core.add_text(),
                    Command::Delete => core.delete_selection(),
                    Command::ZoomIn => vec![core.zoom_in()],
                    Command::ZoomOut => vec![core.zoom_out()],
                    Command::ResetZoom => vec![core.reset_zoom()],
                    Command::ToggleGrid => {
                        core.toggle_grid();
                        redraw(Vec::new())
                    }
                });
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_cmd: Command| {}
        }
    };

    let on_grid_size = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::Event| {
                let raw = event_target_value(&ev);
                grid_input.set(raw.clone());
                if let Some(size) = parse_grid_size(&raw) {
                    run(&engine, view_state, |core| {
                        core.set_grid_size(size);
                        redraw(Vec::new())
                    });
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |ev: leptos::ev::Event| grid_input.set(event_target_value(&ev))
        }
    };

    let on_pointer_down = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                if let Some(canvas) = canvas_ref.get() {
                    crate::util::browser::focus(&canvas);
                    let _ = canvas.set_pointer_capture(ev.pointer_id());
                }
                let point = pointer_point(&ev);
                let button = Button::from_dom(ev.button());
                let mods = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                run(&engine, view_state, |core| core.on_pointer_down(point, button, mods));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_move = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                let point = pointer_point(&ev);
                let mods = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                run(&engine, view_state, |core| core.on_pointer_move(point, mods));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_pointer_up = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::PointerEvent| {
                let point = pointer_point(&ev);
                let button = Button::from_dom(ev.button());
                let mods = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                run(&engine, view_state, |core| core.on_pointer_up(point, button, mods));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::PointerEvent| {}
        }
    };

    let on_double_click = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::MouseEvent| {
                let point = crate::util::designer_input::mouse_point(&ev);
                run(&engine, view_state, |core| core.on_double_click(point));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::MouseEvent| {}
        }
    };

    let on_key_down = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |ev: leptos::ev::KeyboardEvent| {
                let key = Key::new(ev.key());
                let focused = crate::util::designer_input::text_field_focused();
                if should_prevent_default_key(&key, focused) {
                    ev.prevent_default();
                }
                run(&engine, view_state, |core| core.on_key_down(&key, focused));
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_ev: leptos::ev::KeyboardEvent| {}
        }
    };

    // Floating text editor: Enter (without Shift) or blur commits, Escape discards.
    let commit_text = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move || {
                let Some(edit) = view_state.with_untracked(|v| v.editing.clone()) else {
                    return;
                };
                view_state.update(|v| v.editing = None);
                run(&engine, view_state, |core| redraw(core.set_text(&edit.id, edit.text).into_iter().collect()));
                if let Some(canvas) = canvas_ref.get_untracked() {
                    crate::util::browser::focus(&canvas);
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move || view_state.update(|v| v.editing = None)
        }
    };
    let commit_on_blur = commit_text.clone();

    let on_editor_key = {
        #[cfg(feature = "csr")]
        {
            let commit_text = commit_text.clone();
            move |ev: leptos::ev::KeyboardEvent| {
                let key = Key::new(ev.key());
                let mods = map_modifiers(ev.shift_key(), ev.ctrl_key(), ev.alt_key(), ev.meta_key());
                match overlay_key_action(&key, mods) {
                    OverlayKey::Commit => {
                        ev.prevent_default();
                        commit_text();
                    }
                    OverlayKey::Discard => {
                        ev.prevent_default();
                        view_state.update(|v| v.editing = None);
                        if let Some(canvas) = canvas_ref.get_untracked() {
                            crate::util::browser::focus(&canvas);
                        }
                    }
                    OverlayKey::Pass => {}
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &commit_text;
            move |_ev: leptos::ev::KeyboardEvent| {}
        }
    };

    let on_save = {
        #[cfg(feature = "csr")]
        {
            let engine = Rc::clone(&engine);
            move |_| {
                if !view_state.with_untracked(DesignerView::can_save) {
                    return;
                }
                let title_value = title.get_untracked().trim().to_owned();
                let title_opt = (!title_value.is_empty()).then_some(title_value);
                let Some(markup) = engine.borrow().as_ref().map(|e| e.core.serialize(title_opt.as_deref())) else {
                    return;
                };
                view_state.update(|v| {
                    v.saving = true;
                    v.save_error = None;
                });
                leptos::task::spawn_local(async move {
                    let used_at = crate::util::browser::now_ms();
                    let mut api = crate::net::api::Api::new(session.get_untracked());
                    let result = api.upload_floor_map(&markup, used_at).await;
                    crate::state::session::commit(session, api.into_session());
                    match result {
                        Ok(uploaded) => {
                            let origin = crate::util::browser::origin();
                            let mut url = String::new();
                            recent.update(|r| {
                                url = crate::state::recent::record_upload(r, &origin, &uploaded, title_opt, used_at);
                            });
                            view_state.try_update(|v| v.saving = false);
                            on_saved.run(url);
                        }
                        Err(err) => {
                            view_state.try_update(|v| {
                                v.saving = false;
                                v.save_error = Some(err.to_string());
                            });
                        }
                    }
                });
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = on_saved;
            move |_| {}
        }
    };

    let tool_button = move |tool: Tool, label: &'static str| {
        let set_tool = set_tool.clone();
        view! {
            <button
                class="btn designer__tool"
                class:designer__tool--active=move || view_state.with(|v| v.tool == tool)
                on:click=move |_| set_tool(tool)
            >
                {label}
            </button>
        }
    };
    let toggle_grid = command.clone();
    let command_button = move |cmd: Command, label: &'static str, title_text: &'static str| {
        let command = command.clone();
        view! {
            <button class="btn designer__command" title=title_text on:click=move |_| command(cmd)>
                {label}
            </button>
        }
    };

    view! {
        <div class="dialog-backdrop dialog-backdrop--stacked">
            <div class="dialog dialog--designer" on:click=move |ev| ev.stop_propagation()>
                <header class="designer__toolbar">
                    {tool_button(Tool::Select, "Select")}
                    {tool_button(Tool::Rect, "Rectangle")}
                    {tool_button(Tool::Text, "Text")}
                    <span class="toolbar__divider" aria-hidden="true"></span>
                    {command_button(Command::AddRect, "+ Rect", "Add a rectangle")}
                    {command_button(Command::AddText, "+ Text", "Add a text box")}
                    {command_button(Command::Delete, "Delete", "Delete the selection")}
                    <span class="toolbar__divider" aria-hidden="true"></span>
                    {command_button(Command::ZoomOut, "-", "Zoom out")}
                    <span class="designer__zoom">{move || zoom_label(view_state.with(|v| v.zoom_percent))}</span>
                    {command_button(Command::ZoomIn, "+", "Zoom in")}
                    {command_button(Command::ResetZoom, "100%", "Reset zoom")}
                    <span class="toolbar__divider" aria-hidden="true"></span>
                    <label class="designer__grid">
                        <input
                            type="checkbox"
                            prop:checked=move || view_state.with(|v| v.grid_enabled)
                            on:change=move |_| toggle_grid(Command::ToggleGrid)
                        />
                        "Snap to grid"
                    </label>
                    <input
                        class="designer__grid-size"
                        type="number"
                        min="1"
                        step="1"
                        prop:value=move || grid_input.get()
                        on:change=on_grid_size
                    />
                </header>
                <Show when=move || view_state.with(|v| v.surface_error.is_some())>
                    <p class="dialog__error designer__surface-error">
                        {move || view_state.with(|v| v.surface_error.clone().unwrap_or_default())}
                    </p>
                </Show>
                <div class="designer__viewport">
                    <canvas
                        class="designer__canvas"
                        node_ref=canvas_ref
                        tabindex="0"
                        style=move || format!("cursor: {};", view_state.with(|v| v.cursor.clone()))
                        on:pointerdown=on_pointer_down
                        on:pointermove=on_pointer_move
                        on:pointerup=on_pointer_up
                        on:dblclick=on_double_click
                        on:keydown=on_key_down
                    >
                        "Your browser does not support canvas."
                    </canvas>
                    <textarea
                        class="designer__text-editor"
                        node_ref=editor_ref
                        style=move || {
                            view_state.with(|v| match &v.editing {
                                Some(edit) => edit.overlay.css(),
                                None => "display: none;".to_owned(),
                            })
                        }
                        prop:value=move || {
                            view_state.with(|v| v.editing.as_ref().map(|e| e.text.clone()).unwrap_or_default())
                        }
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            view_state.update(|v| {
                                if let Some(edit) = v.editing.as_mut() {
                                    edit.text = text;
                                }
                            });
                        }
                        on:keydown=on_editor_key
                        on:blur=move |_| {
                            if view_state.with_untracked(|v| v.editing.is_some()) {
                                commit_on_blur();
                            }
                        }
                    ></textarea>
                </div>
                <footer class="designer__footer">
                    <label class="dialog__label designer__title">
                        "Title"
                        <input
                            class="dialog__input"
                            type="text"
                            placeholder="e.g. HQ 3F West"
                            prop:value=move || title.get()
                            on:input=move |ev| title.set(event_target_value(&ev))
                        />
                    </label>
                    <Show when=move || view_state.with(|v| v.save_error.is_some())>
                        <p class="dialog__error">
                            {move || view_state.with(|v| v.save_error.clone().unwrap_or_default())}
                        </p>
                    </Show>
                    <div class="dialog__actions">
                        <button class="btn" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button
                            class="btn btn--primary"
                            disabled=move || !view_state.with(DesignerView::can_save)
                            on:click=on_save
                        >
                            {move || if view_state.with(|v| v.saving) { "Saving..." } else { "Save floor plan" }}
                        </button>
                    </div>
                </footer>
            </div>
        </div>
    }
}
