use shared::api::{CreateKnowledgeRequest, ListKnowledgeQuery, Pagination};
use shared::error::ClientError;
use shared::fetch::{list_view, FetchState, ListView};
use shared::models::KnowledgeEntry;
use shared::notice::Notice;
use uuid::Uuid;
use validator::Validate;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::toast::{use_notice, NoticeHandle, Toast};
use crate::config::config;
use crate::services::api::ApiService;

const PAGE_SIZE: u32 = 20;
const PREVIEW_CHARS: usize = 160;

#[function_component(KnowledgePage)]
pub fn knowledge_page() -> Html {
    let entries = use_state(FetchState::<Vec<KnowledgeEntry>>::default);
    let pagination = use_state(Pagination::default);
    let page = use_state(|| 1u32);
    let search_input = use_state(String::new);
    let search = use_state(String::new);
    let refresh_trigger = use_state(|| 0u32);
    let notice = use_notice();

    {
        let entries = entries.clone();
        let pagination = pagination.clone();
        let deps = (*page, (*search).clone(), *refresh_trigger);
        use_effect_with(deps, move |(page, search, _)| {
            let query = ListKnowledgeQuery {
                business_id: config().business_id,
                page: Some(*page),
                limit: Some(PAGE_SIZE),
                search: Some(search.clone()),
            };
            entries.set(FetchState::Loading);
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::list_knowledge(query).await {
                    Ok(response) => {
                        pagination.set(response.pagination);
                        entries.set(FetchState::Loaded(response.entries));
                    }
                    Err(e) => {
                        tracing::error!("Failed to fetch knowledge entries: {}", e);
                        entries.set(FetchState::Failed(e));
                    }
                }
            });
            || ()
        });
    }

    let refresh = {
        let refresh_trigger = refresh_trigger.clone();
        Callback::from(move |_: ()| refresh_trigger.set(*refresh_trigger + 1))
    };

    let on_search_input = {
        let search_input = search_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search_input.set(input.value());
        })
    };

    let on_search = {
        let search_input = search_input.clone();
        let search = search.clone();
        let page = page.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            page.set(1);
            search.set((*search_input).trim().to_string());
        })
    };

    let on_delete = {
        let refresh = refresh.clone();
        let show_notice = notice.show.clone();
        Callback::from(move |id: Uuid| {
            let refresh = refresh.clone();
            let show_notice = show_notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::delete_knowledge(id).await {
                    Ok(()) => {
                        tracing::info!("Deleted knowledge entry {}", id);
                        show_notice.emit(Notice::success("Entry deleted"));
                        refresh.emit(());
                    }
                    Err(e) => {
                        tracing::error!("Failed to delete knowledge entry {}: {}", id, e);
                        show_notice.emit(Notice::error(format!("Could not delete entry: {}", e)));
                    }
                }
            });
        })
    };

    let on_retry = {
        let refresh = refresh.clone();
        Callback::from(move |_| refresh.emit(()))
    };

    let list = match list_view(true, &*entries) {
        ListView::PrerequisiteMissing | ListView::Loading => html! {
            <div class="loading">
                <div class="spinner"></div>
            </div>
        },
        ListView::Error(err) => html! {
            <div class="error-banner">
                <p class="error">{ format!("Failed to load knowledge base: {}", err) }</p>
                if err.is_retryable() {
                    <button class="btn btn-secondary" onclick={on_retry}>{ "Retry" }</button>
                }
            </div>
        },
        ListView::Empty => html! {
            <div class="empty-state">
                if search.is_empty() {
                    <p>{ "No knowledge yet. Add notes or upload documents for the assistant to use." }</p>
                } else {
                    <p>{ format!("Nothing matches \"{}\".", *search) }</p>
                }
            </div>
        },
        ListView::Populated(items) => html! {
            <ul class="knowledge-list">
                { for items.iter().map(|entry| {
                    let on_delete = on_delete.clone();
                    let id = entry.id;
                    html! {
                        <li class="knowledge-item" key={id.to_string()}>
                            <div class="knowledge-title">{ &entry.title }</div>
                            if let Some(file_name) = &entry.file_name {
                                <div class="knowledge-file">
                                    if let Some(url) = &entry.file_url {
                                        <a href={url.clone()} target="_blank" rel="noopener noreferrer">{ file_name }</a>
                                    } else {
                                        { file_name }
                                    }
                                </div>
                            }
                            if let Some(preview) = entry.preview(PREVIEW_CHARS) {
                                <p class="knowledge-preview">{ preview }</p>
                            }
                            if let Some(status) = entry.processing_status {
                                <span class={format!("badge badge-{}", status.as_str())}>{ status.as_str() }</span>
                            }
                            <button class="btn btn-danger" onclick={Callback::from(move |_| on_delete.emit(id))}>
                                { "Delete" }
                            </button>
                        </li>
                    }
                })}
            </ul>
        },
    };

    let on_prev = {
        let page = page.clone();
        Callback::from(move |_| page.set((*page).saturating_sub(1).max(1)))
    };
    let on_next = {
        let page = page.clone();
        Callback::from(move |_| page.set(*page + 1))
    };

    html! {
        <div class="container">
            <h2>{ "Knowledge Base" }</h2>
            <form class="search-form" onsubmit={on_search}>
                <input
                    type="search"
                    class="input"
                    placeholder="Search knowledge"
                    value={(*search_input).clone()}
                    oninput={on_search_input}
                />
                <button type="submit" class="btn btn-secondary">{ "Search" }</button>
            </form>
            { list }
            if pagination.total_pages > 1 {
                <div class="pagination">
                    <button class="btn btn-secondary" disabled={!pagination.has_prev()} onclick={on_prev}>{ "Previous" }</button>
                    <span>{ format!("Page {} of {} ({} entries)", pagination.page, pagination.total_pages, pagination.total) }</span>
                    <button class="btn btn-secondary" disabled={!pagination.has_next()} onclick={on_next}>{ "Next" }</button>
                </div>
            }
            <CreateEntryForm on_created={refresh.clone()} notice={notice.clone()} />
            <UploadForm on_uploaded={refresh} notice={notice.clone()} />
            <Toast notice={notice.current.clone()} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CreateEntryFormProps {
    on_created: Callback<()>,
    notice: NoticeHandle,
}

#[function_component(CreateEntryForm)]
fn create_entry_form(props: &CreateEntryFormProps) -> Html {
    let title = use_state(String::new);
    let content = use_state(String::new);
    let saving = use_state(|| false);

    let on_title = {
        let title = title.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            title.set(input.value());
        })
    };

    let on_content = {
        let content = content.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            content.set(input.value());
        })
    };

    let on_submit = {
        let title = title.clone();
        let content = content.clone();
        let saving = saving.clone();
        let on_created = props.on_created.clone();
        let show_notice = props.notice.show.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let request = CreateKnowledgeRequest {
                title: title.trim().to_string(),
                content: content.trim().to_string(),
                business_id: config().business_id,
            };
            if let Err(errors) = request.validate() {
                show_notice.emit(Notice::error(ClientError::from(errors).to_string()));
                return;
            }

            saving.set(true);
            let title = title.clone();
            let content = content.clone();
            let saving = saving.clone();
            let on_created = on_created.clone();
            let show_notice = show_notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::create_knowledge(request).await {
                    Ok(entry) => {
                        tracing::info!("Created knowledge entry {}", entry.id);
                        title.set(String::new());
                        content.set(String::new());
                        show_notice.emit(Notice::success("Entry added"));
                        on_created.emit(());
                    }
                    Err(e) => {
                        tracing::error!("Failed to create knowledge entry: {}", e);
                        show_notice.emit(Notice::error(format!("Could not add entry: {}", e)));
                    }
                }
                saving.set(false);
            });
        })
    };

    html! {
        <form class="knowledge-form" onsubmit={on_submit}>
            <h3>{ "Add Entry" }</h3>
            <input
                type="text"
                class="input"
                placeholder="Title"
                value={(*title).clone()}
                oninput={on_title}
            />
            <textarea
                class="input"
                placeholder="What should the assistant know?"
                value={(*content).clone()}
                oninput={on_content}
            />
            <button type="submit" class="btn btn-primary" disabled={*saving}>{ "Add" }</button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct UploadFormProps {
    on_uploaded: Callback<()>,
    notice: NoticeHandle,
}

#[function_component(UploadForm)]
fn upload_form(props: &UploadFormProps) -> Html {
    let file_input = use_node_ref();
    let title = use_state(String::new);
    let uploading = use_state(|| false);

    let on_title = {
        let title = title.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            title.set(input.value());
        })
    };

    let on_submit = {
        let file_input = file_input.clone();
        let title = title.clone();
        let uploading = uploading.clone();
        let on_uploaded = props.on_uploaded.clone();
        let show_notice = props.notice.show.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *uploading {
                return;
            }
            let Some(input) = file_input.cast::<HtmlInputElement>() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                show_notice.emit(Notice::error("Choose a file to upload"));
                return;
            };

            uploading.set(true);
            let upload_title = Some((*title).clone());
            let title = title.clone();
            let uploading = uploading.clone();
            let on_uploaded = on_uploaded.clone();
            let show_notice = show_notice.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match ApiService::upload_knowledge(file, upload_title, config().business_id).await {
                    Ok(uploaded) => {
                        tracing::info!(
                            "Uploaded knowledge file as {} ({})",
                            uploaded.entry.id,
                            uploaded.processing_status.as_str()
                        );
                        input.set_value("");
                        title.set(String::new());
                        show_notice.emit(Notice::success(format!(
                            "Upload received, processing status: {}",
                            uploaded.processing_status.as_str()
                        )));
                        on_uploaded.emit(());
                    }
                    Err(e) => {
                        tracing::error!("Failed to upload knowledge file: {}", e);
                        show_notice.emit(Notice::error(format!("Upload failed: {}", e)));
                    }
                }
                uploading.set(false);
            });
        })
    };

    html! {
        <form class="knowledge-upload" onsubmit={on_submit}>
            <h3>{ "Upload Document" }</h3>
            <input type="file" ref={file_input} />
            <input
                type="text"
                class="input"
                placeholder="Title (optional)"
                value={(*title).clone()}
                oninput={on_title}
            />
            <button type="submit" class="btn btn-primary" disabled={*uploading}>
                { if *uploading { "Uploading…" } else { "Upload" } }
            </button>
        </form>
    }
}
