pub mod text_search_xml;
