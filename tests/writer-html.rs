use xml_emit::name::QName;
use xml_emit::settings::{OutputMethod, WriterSettings};
use xml_emit::RawWrite;

use pretty_assertions::assert_eq;

mod helpers;
use helpers::{attribute, element, render, settings, text_element};

fn html() -> WriterSettings {
    settings(|s| s.output_method = OutputMethod::Html)
}

#[test]
fn page() {
    let settings = settings(|s| {
        s.output_method = OutputMethod::Html;
        s.indent = true;
        s.doc_type_public = Some("-//W3C//DTD HTML 4.01//EN".into());
        s.doc_type_system = Some("http://www.w3.org/TR/html4/strict.dtd".into());
    });
    let html = render(&settings, |w| {
        element(w, QName::local("html"), |w| {
            element(w, QName::local("head"), |w| text_element(w, "title", "Page"))?;
            element(w, QName::local("body"), |w| {
                element(w, QName::local("p"), |w| {
                    w.write_text("a < b")?;
                    element(w, QName::local("br"), |_| Ok(()))
                })?;

                w.write_start_element(QName::local("form"))?;
                attribute(w, QName::local("action"), "/go?q=\u{E9}")?;
                w.start_element_content()?;

                w.write_start_element(QName::local("input"))?;
                attribute(w, QName::local("type"), "checkbox")?;
                attribute(w, QName::local("checked"), "checked")?;
                w.start_element_content()?;
                w.write_end_element(QName::local("input"))?;

                w.write_end_element(QName::local("form"))
            })
        })
    });
    assert_eq!(
        html,
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">\n\
         <html>\n  \
           <head>\n    \
             <META http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\">\n    \
             <title>Page</title>\n  \
           </head>\n  \
           <body>\n    \
             <p>a &lt; b<br></p>\n    \
             <form action=\"/go?q=%C3%A9\"><input type=\"checkbox\" checked></form>\n  \
           </body>\n\
         </html>"
    );
}

#[test]
fn media_type() {
    let settings = settings(|s| {
        s.output_method = OutputMethod::Html;
        s.media_type = Some("application/xhtml+xml".into());
    });
    let html = render(&settings, |w| element(w, QName::local("head"), |_| Ok(())));
    assert_eq!(
        html,
        "<head><META http-equiv=\"Content-Type\" content=\"application/xhtml+xml; charset=utf-8\"></head>"
    );
}

#[test]
fn elements_are_not_collapsed() {
    let html = render(&html(), |w| {
        element(w, QName::local("div"), |w| {
            element(w, QName::local("span"), |_| Ok(()))?;
            element(w, QName::local("img"), |_| Ok(()))?;
            element(w, QName::local("HR"), |_| Ok(()))
        })
    });
    assert_eq!(html, "<div><span></span><img><HR></div>");
}

#[test]
fn script_and_style() {
    let html = render(&html(), |w| {
        element(w, QName::local("div"), |w| {
            text_element(w, "script", "if (a < b && c > d) {}")?;
            text_element(w, "STYLE", "p > a { content: '&' }")?;
            text_element(w, "code", "a < b")
        })
    });
    assert_eq!(
        html,
        "<div>\
            <script>if (a < b && c > d) {}</script>\
            <STYLE>p > a { content: '&' }</STYLE>\
            <code>a &lt; b</code>\
         </div>"
    );
}

/// CDATA sections are not a part of HTML, so the text is written as is
#[test]
fn cdata_elements() {
    let mut settings = html();
    settings.cdata_section_elements.insert("script".into());
    let html = render(&settings, |w| {
        element(w, QName::local("div"), |w| {
            text_element(w, "script", "a < b")?;
            w.write_cdata("]]>")
        })
    });
    assert_eq!(html, "<div><script>a < b</script>]]></div>");
}

#[test]
fn attributes() {
    let html = render(&html(), |w| {
        w.write_start_element(QName::local("a"))?;
        attribute(w, QName::local("href"), "/a b/\u{E9}?x=\"1\"&y")?;
        attribute(w, QName::local("name"), "\u{E9}")?;
        attribute(w, QName::local("title"), "\u{E9} < &{x}")?;
        attribute(w, QName::local("checked"), "x")?;
        w.start_element_content()?;
        w.write_end_element(QName::local("a"))
    });
    assert_eq!(
        html,
        "<a href=\"/a b/%C3%A9?x=&quot;1&quot;&amp;y\" name=\"%C3%A9\" title=\"\u{E9} < &{x}\" checked=\"x\"></a>"
    );

    let unescaped = settings(|s| {
        s.output_method = OutputMethod::Html;
        s.do_not_escape_uri_attributes = true;
    });
    let html = render(&unescaped, |w| {
        w.write_start_element(QName::local("a"))?;
        attribute(w, QName::local("href"), "/\u{E9}")?;
        w.start_element_content()?;
        w.write_end_element(QName::local("a"))
    });
    assert_eq!(html, "<a href=\"/\u{E9}\"></a>");
}

#[test]
fn namespaced_elements() {
    let html = render(&html(), |w| {
        element(w, QName::local("p"), |w| {
            let svg = QName::new("s", "svg", "http://www.w3.org/2000/svg");
            w.write_start_element(svg)?;
            w.write_namespace_declaration("s", "http://www.w3.org/2000/svg")?;
            w.start_element_content()?;
            w.write_start_element(QName::new("s", "br", "http://www.w3.org/2000/svg"))?;
            attribute(w, QName::new("x", "src", "urn:x"), "<\u{E9}>")?;
            w.start_element_content()?;
            w.write_end_element(QName::new("s", "br", "http://www.w3.org/2000/svg"))?;
            w.write_end_element(svg)
        })
    });
    assert_eq!(
        html,
        "<p><s:svg xmlns:s=\"http://www.w3.org/2000/svg\"><s:br x:src=\"&lt;\u{E9}&gt;\" /></s:svg></p>"
    );
}

#[test]
fn markup() {
    let html = render(&html(), |w| {
        w.write_xml_declaration(None)?;
        w.write_pi("php", "echo 1")?;
        w.write_comment("a--b")?;
        element(w, QName::local("p"), |w| {
            w.write_entity_ref("nbsp")?;
            w.write_char_entity('\u{A0}')
        })
    });
    assert_eq!(html, "<?php echo 1><!--a- -b--><p>&nbsp;&#xA0;</p>");
}
