use std::rc::Rc;

use gloo::timers::callback::Timeout;
use shared::notice::Notice;
use yew::prelude::*;

/// Handle returned by [`use_notice`]: the notice on screen and a way to show one.
#[derive(Clone, PartialEq)]
pub struct NoticeHandle {
    pub current: Option<Notice>,
    pub show: Callback<Notice>,
}

/// Local toast state. A notice disappears after [`Notice::DISPLAY_MS`]
/// unless a newer one replaced it first.
#[hook]
pub fn use_notice() -> NoticeHandle {
    let current = use_state(|| None::<(u32, Notice)>);
    let counter = use_mut_ref(|| 0u32);

    let show = {
        let current = current.clone();
        Callback::from(move |notice: Notice| {
            let id = {
                let mut counter = counter.borrow_mut();
                *counter = counter.wrapping_add(1);
                *counter
            };
            current.set(Some((id, notice)));

            let current = current.clone();
            let counter = Rc::clone(&counter);
            Timeout::new(Notice::DISPLAY_MS, move || {
                if *counter.borrow() == id {
                    current.set(None);
                }
            })
            .forget();
        })
    };

    NoticeHandle {
        current: (*current).as_ref().map(|(_, notice)| notice.clone()),
        show,
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub notice: Option<Notice>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    match &props.notice {
        Some(notice) => html! {
            <div class={notice.css_class()} role="status">{ &notice.text }</div>
        },
        None => html! {},
    }
}
