use desktop_app_contract::AppMountContext;
use leptos::*;

use super::{pointer_from_mouse_event, use_desktop_runtime};
use crate::{
    gestures::{DragArea, Resizer, TrafficLight},
    host::DomWindowSurface,
    model::{Instance, InstanceId, ResizeEdge},
};

fn is_primary_button(ev: &web_sys::MouseEvent) -> bool {
    ev.button() == 0
}

#[component]
pub(super) fn DesktopWindow(instance: Instance) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let instance_id = instance.instance_id;
    let window_ref = create_node_ref::<html::Div>();
    let drag = store_value(DragArea::new(instance_id));
    let resize = store_value(None::<Resizer>);

    window_ref.on_load(move |element| {
        let surface = DomWindowSurface::new(web_sys::HtmlElement::clone(&element));
        let _ = runtime.dispatch("mount window", |windows| {
            windows.set_window_element(instance_id, surface)
        });
    });

    let move_listener = window_event_listener(ev::mousemove, move |ev| {
        let pointer = pointer_from_mouse_event(&ev);
        if let Some(gesture) = drag.try_get_value().filter(DragArea::is_listening) {
            let _ = runtime.dispatch("drag window", |windows| gesture.pointer_move(windows, pointer));
        }
        if let Some(gesture) = resize.try_get_value().flatten().filter(Resizer::is_listening) {
            let _ = runtime.dispatch("resize window", |windows| {
                gesture.pointer_move(windows, pointer)
            });
        }
    });
    let up_listener = window_event_listener(ev::mouseup, move |_| {
        if let Some(mut gesture) = drag.try_get_value().filter(DragArea::is_listening) {
            let _ = runtime.dispatch("end window drag", |windows| gesture.pointer_up(windows));
            drag.set_value(gesture);
        }
        let _ = resize.try_update_value(|active| {
            if let Some(gesture) = active.as_mut() {
                gesture.pointer_up();
            }
            *active = None;
        });
    });
    on_cleanup(move || {
        move_listener.remove();
        up_listener.remove();
        let _ = runtime
            .windows
            .try_update_value(|windows| windows.unbind_window_element(instance_id));
    });

    let begin_drag = move |ev: web_sys::MouseEvent| {
        if !is_primary_button(&ev) {
            return;
        }
        ev.prevent_default();
        drag.update_value(|gesture| gesture.pointer_down());
    };

    let title = instance.application.title().to_string();
    let body = instance.application.render(AppMountContext { instance_id });

    view! {
        <div
            node_ref=window_ref
            id=instance_id.dom_id()
            class="desktop-window"
            role="dialog"
            aria-label=title.clone()
            style="display:none;position:absolute;top:0;left:0;"
        >
            <div class="window-drag-area" on:mousedown=begin_drag>
                <TrafficLights instance_id />
                <span class="window-title">{title}</span>
            </div>
            <div class="window-body">{body}</div>
            {ResizeEdge::ALL
                .into_iter()
                .map(|edge| view! { <ResizeHandle instance_id edge resize /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn TrafficLights(instance_id: InstanceId) -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <div class="traffic-lights">
            {TrafficLight::ALL
                .into_iter()
                .map(|light| {
                    view! {
                        <button
                            type="button"
                            class=format!("traffic-light traffic-light-{}", light.label())
                            aria-label=light.label()
                            on:mousedown=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                            on:click=move |ev: web_sys::MouseEvent| {
                                ev.stop_propagation();
                                let _ = runtime.dispatch(light.label(), |windows| {
                                    light.press(windows, instance_id)
                                });
                            }
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn ResizeHandle(
    instance_id: InstanceId,
    edge: ResizeEdge,
    resize: StoredValue<Option<Resizer>>,
) -> impl IntoView {
    let on_mousedown = move |ev: web_sys::MouseEvent| {
        if !is_primary_button(&ev) {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        let mut gesture = Resizer::new(instance_id, edge);
        gesture.pointer_down();
        resize.set_value(Some(gesture));
    };

    view! {
        <div
            class=format!("window-resize-handle window-resize-{}", edge.token())
            aria-hidden="true"
            on:mousedown=on_mousedown
        />
    }
}
