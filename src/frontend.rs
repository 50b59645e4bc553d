use std::rc::Rc;

use web_sys::{HtmlElement, HtmlFormElement, SubmitEvent};
use yew::prelude::*;

use crate::clipboard::CopyFeedback;
use crate::config::SiteConfig;
use crate::dom::{ControllerHooks, EffectsController, MENU_ATTR, MENU_TOGGLE_ATTR};
use crate::filter::{matches_filter, ALL_CATEGORIES};
use crate::interactions::{copy_with_feedback, submit_async_form};
use crate::logging::{log_event, LogLevel};
use crate::navigation::MenuState;
use crate::notify::DomNotifier;
use crate::smooth_scroll::scroll_window_to;
use crate::theme::{apply_theme, apply_theme_with_transition, persist_theme, resolve_theme};
use crate::util::browser::document;

const CONTACT_EMAIL: &str = "hello@alexmorgan.dev";
const CONTACT_ENDPOINT: &str = "https://formspree.io/f/xbjnqkzd";

enum MenuAction {
    Toggle,
    Close,
    Resized { width: f64, breakpoint: f64 },
}

impl Reducible for MenuState {
    type Action = MenuAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            MenuAction::Toggle => self.toggled(),
            MenuAction::Close => self.closed(),
            MenuAction::Resized { width, breakpoint } => self.after_resize(width, breakpoint),
        };

        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[derive(Clone, PartialEq)]
struct Project {
    title: &'static str,
    description: &'static str,
    categories: &'static str,
    image: &'static str,
    href: &'static str,
}

const PROJECTS: &[Project] = &[
    Project {
        title: "Trailhead",
        description: "Offline-first hiking planner with elevation-aware routing.",
        categories: "web mobile",
        image: "/images/trailhead.webp",
        href: "https://github.com/alexmorgan/trailhead",
    },
    Project {
        title: "Ledgerline",
        description: "Personal finance dashboard built on a streaming ledger.",
        categories: "web data",
        image: "/images/ledgerline.webp",
        href: "https://github.com/alexmorgan/ledgerline",
    },
    Project {
        title: "Palette Lab",
        description: "Accessible color palette generator with contrast checks.",
        categories: "design web",
        image: "/images/palette-lab.webp",
        href: "https://github.com/alexmorgan/palette-lab",
    },
    Project {
        title: "Sightline",
        description: "Image classifier for wildlife camera traps.",
        categories: "data",
        image: "/images/sightline.webp",
        href: "https://github.com/alexmorgan/sightline",
    },
];

const FILTERS: &[(&str, &str)] = &[
    (ALL_CATEGORIES, "All"),
    ("web", "Web"),
    ("mobile", "Mobile"),
    ("data", "Data"),
    ("design", "Design"),
];

const NAV_LINKS: &[(&str, &str)] = &[
    ("home", "Home"),
    ("about", "About"),
    ("projects", "Projects"),
    ("contact", "Contact"),
];

#[derive(Properties, PartialEq)]
struct ExternalLinkProps {
    href: AttrValue,
    label: AttrValue,
}

#[function_component(ExternalLink)]
fn external_link(props: &ExternalLinkProps) -> Html {
    html! {
        <a class="link" href={props.href.clone()} target="_blank" rel="noopener noreferrer">
            {props.label.clone()}
            <span class="external-mark" aria-hidden="true">{"↗"}</span>
            <span class="sr-only">{" (opens in a new tab)"}</span>
        </a>
    }
}

#[derive(Properties, PartialEq)]
struct CopyButtonProps {
    text: AttrValue,
    label: AttrValue,
    config: Rc<SiteConfig>,
}

#[function_component(CopyButton)]
fn copy_button(props: &CopyButtonProps) -> Html {
    let button_ref = use_node_ref();
    let feedback = {
        let label = props.label.to_string();
        use_mut_ref(move || CopyFeedback::new(label))
    };

    let onclick = {
        let button_ref = button_ref.clone();
        let text = props.text.to_string();
        let config = props.config.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(button) = button_ref.cast::<HtmlElement>() {
                copy_with_feedback(
                    button,
                    text.clone(),
                    feedback.clone(),
                    config.clone(),
                    DomNotifier::new(config.clone()),
                );
            }
        })
    };

    html! {
        <button ref={button_ref} class="copy-button" type="button" data-copy={props.text.clone()} {onclick}>
            {props.label.clone()}
        </button>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: Project,
    visible: bool,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = &props.project;

    html! {
        <article
            class={classes!("project-card", (!props.visible).then_some("is-filtered-out"))}
            data-category={project.categories}
            data-reveal=""
            hidden={!props.visible}
        >
            <img class="project-media" data-lazy-src={project.image} alt={project.title} width="640" height="400" />
            <h3>{project.title}</h3>
            <p class="muted">{project.description}</p>
            <ExternalLink href={project.href} label="Source" />
        </article>
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| SiteConfig::from_document());
    let theme = use_state(resolve_theme);
    let menu = use_reducer(MenuState::default);
    let filter = use_state(|| ALL_CATEGORIES.to_string());
    let form_ref = use_node_ref();

    {
        let current = *theme;
        use_effect_with((), move |_| {
            apply_theme(current);
            || ()
        });
    }

    use_effect_with(*menu, |menu| {
        if let Some(body) = document().and_then(|d| d.body()) {
            let _ = body.style().set_property("overflow", menu.body_overflow());
        }
        || ()
    });

    {
        let config = config.clone();
        let dispatcher = menu.dispatcher();
        use_effect_with((), move |_| {
            let breakpoint = config.desktop_breakpoint;
            let hooks = ControllerHooks {
                on_close_menu: {
                    let dispatcher = dispatcher.clone();
                    Callback::from(move |_| dispatcher.dispatch(MenuAction::Close))
                },
                on_resize: Callback::from(move |width: f64| {
                    dispatcher.dispatch(MenuAction::Resized { width, breakpoint })
                }),
            };
            let controller = EffectsController::install(config, hooks);
            move || drop(controller)
        });
    }

    let on_toggle_theme = {
        let theme = theme.clone();
        let config = config.clone();
        Callback::from(move |_| {
            let next = (*theme).toggled();
            persist_theme(next);
            apply_theme_with_transition(next);
            log_event(
                &config,
                LogLevel::Debug,
                "theme_changed",
                serde_json::json!({ "theme": next.as_str() }),
            );
            theme.set(next);
        })
    };

    let on_toggle_menu = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.dispatch(MenuAction::Toggle))
    };

    let on_back_to_top = {
        let duration = config.scroll_duration_ms;
        Callback::from(move |_: MouseEvent| scroll_window_to(0.0, duration))
    };

    let on_submit = {
        let form_ref = form_ref.clone();
        let config = config.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if let Some(form) = form_ref.cast::<HtmlFormElement>() {
                submit_async_form(form, config.clone(), DomNotifier::new(config.clone()));
            }
        })
    };

    let filter_buttons = FILTERS.iter().map(|(category, label)| {
        let active = filter.as_str() == *category;
        let onclick = {
            let filter = filter.clone();
            let category = category.to_string();
            Callback::from(move |_: MouseEvent| filter.set(category.clone()))
        };
        html! {
            <button
                class={classes!("filter-button", active.then_some("active"))}
                type="button"
                data-filter={*category}
                aria-pressed={active.to_string()}
                {onclick}
            >
                {*label}
            </button>
        }
    });

    let project_cards = PROJECTS.iter().map(|project| {
        html! {
            <ProjectCard
                project={project.clone()}
                visible={matches_filter(filter.as_str(), project.categories)}
            />
        }
    });

    let nav_links = NAV_LINKS.iter().map(|(id, label)| {
        html! {
            <li><a class="nav-link" href={format!("#{id}")} data-scroll-nav={*id}>{*label}</a></li>
        }
    });

    html! {
        <>
            <a class="skip-link" href="#content" data-native-jump="">{"Skip to main content"}</a>
            <div class="scroll-progress" data-scroll-progress="" aria-hidden="true"></div>
            <header class="site-header" data-hide-on-scroll="">
                <a class="brand" href="#home">{"Alex Morgan"}</a>
                <button
                    class={classes!("nav-toggle", menu.class())}
                    type="button"
                    data-menu-toggle=""
                    aria-label={menu.toggle_label()}
                    aria-expanded={menu.is_open().to_string()}
                    aria-controls="site-menu"
                    onclick={on_toggle_menu}
                >
                    <span class="nav-toggle-bar" aria-hidden="true"></span>
                    <span class="nav-toggle-bar" aria-hidden="true"></span>
                    <span class="nav-toggle-bar" aria-hidden="true"></span>
                </button>
                <nav id="site-menu" class={classes!("site-menu", menu.class())} data-menu="">
                    <ul>{for nav_links}</ul>
                </nav>
                <button
                    class="theme-toggle"
                    type="button"
                    aria-label={(*theme).toggle_label()}
                    aria-pressed={(*theme).pressed().to_string()}
                    onclick={on_toggle_theme}
                >
                    <span aria-hidden="true">{(*theme).icon()}</span>
                </button>
            </header>

            <main id="content" tabindex="-1">
                <section id="home" class="hero" data-scroll-spy="">
                    <div class="hero-backdrop" data-parallax="0.4" aria-hidden="true"></div>
                    <div class="hero-copy" data-reveal="">
                        <h1>{"Alex Morgan"}</h1>
                        <p class="lede">{"Software engineer building calm, fast tools for the web."}</p>
                        <a class="button" href="#projects">{"See my work"}</a>
                    </div>
                </section>

                <section id="about" class="section-block" data-scroll-spy="">
                    <h2 data-reveal="">{"About"}</h2>
                    <p data-reveal="">
                        {"I design and ship full-stack products, with a soft spot for accessibility and performance budgets. "}
                        {"Previously at a climate-data startup; now freelancing and writing about what I learn."}
                    </p>
                    <ul class="inline-list" data-reveal="">
                        <li><span class="muted">{"Languages"}</span>{"Rust, TypeScript, Python"}</li>
                        <li><span class="muted">{"Frameworks"}</span>{"Yew, React, Axum"}</li>
                        <li><span class="muted">{"Tools"}</span>{"Postgres, Figma, Docker"}</li>
                    </ul>
                </section>

                <section id="projects" class="section-block" data-scroll-spy="">
                    <h2 data-reveal="">{"Projects"}</h2>
                    <div class="filter-bar" data-sticky="" data-sticky-offset="70" role="toolbar" aria-label="Filter projects">
                        {for filter_buttons}
                    </div>
                    <div class="project-grid">{for project_cards}</div>
                </section>

                <section id="contact" class="section-block" data-scroll-spy="">
                    <h2 data-reveal="">{"Contact"}</h2>
                    <p data-reveal="">
                        {"Email me at "}
                        <a class="link" href={format!("mailto:{CONTACT_EMAIL}")}>{CONTACT_EMAIL}</a>
                        {" "}
                        <CopyButton text={CONTACT_EMAIL} label="Copy" config={config.clone()} />
                    </p>
                    <form
                        ref={form_ref}
                        class="contact-form"
                        method="post"
                        action={CONTACT_ENDPOINT}
                        data-async=""
                        onsubmit={on_submit}
                    >
                        <label for="contact-name">{"Name"}</label>
                        <input id="contact-name" name="name" type="text" autocomplete="name" required=true />
                        <label for="contact-email">{"Email"}</label>
                        <input id="contact-email" name="email" type="email" autocomplete="email" required=true />
                        <label for="contact-message">{"Message"}</label>
                        <textarea id="contact-message" name="message" rows="5" required=true></textarea>
                        <button class="button" type="submit">{"Send message"}</button>
                    </form>
                </section>
            </main>

            <footer class="site-footer">
                <ExternalLink href="https://github.com/alexmorgan" label="GitHub" />
                <ExternalLink href="https://www.linkedin.com/in/alexmorgan" label="LinkedIn" />
                <ExternalLink href="/resume.pdf" label="Resume" />
            </footer>

            <button
                class="back-to-top"
                type="button"
                data-back-to-top=""
                aria-label="Back to top"
                onclick={on_back_to_top}
            >
                {"↑"}
            </button>
        </>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    log_event(
        &SiteConfig::from_document(),
        LogLevel::Info,
        "site_booted",
        serde_json::json!({ "version": env!("CARGO_PKG_VERSION") }),
    );

    yew::Renderer::<App>::with_root(
        document()
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
